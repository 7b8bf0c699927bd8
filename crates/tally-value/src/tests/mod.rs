pub mod helpers;

pub mod arithmetic;
pub mod canonical;
pub mod comparison;
