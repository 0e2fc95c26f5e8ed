pub mod q_learning;
pub mod value_table;
