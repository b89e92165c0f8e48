// Dashboard handlers module

mod executors_list;
mod shared_utils;

pub use executors_list::executors_page;
