pub mod pdh;
pub mod pdhmsg;
pub mod winnt;
