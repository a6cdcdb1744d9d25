pub mod factorial;
