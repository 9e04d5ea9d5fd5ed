//! Analyses built on top of [`GenomicArray`](crate::data_structs::GenomicArray).

pub mod count;
