pub mod alu;
