pub mod cart;
pub mod category;
pub mod common;
pub mod content;
pub mod discount;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use cart::*;
pub use category::*;
pub use common::*;
pub use content::*;
pub use discount::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;
pub use wishlist::*;
