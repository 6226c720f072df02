//! Outbound adapters: implementations of the domain ports against external
//! systems. Only PostgreSQL persistence lives here today.

pub mod persistence;
