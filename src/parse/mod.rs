mod adjlist;
pub use adjlist::*;

mod recipe;
pub use recipe::*;
