mod all;
mod carousel;
mod footer;
mod log;
mod navbar;
mod page;

use self::log::log;
use super::*;
use footer::footer;
use navbar::{menu, navbar};
use page::page;

pub use all::all as render;
