pub mod check;
pub mod machine;
pub mod tokens;
