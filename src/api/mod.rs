pub mod nasdaq;
