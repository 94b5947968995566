pub mod nbrb;

pub use nbrb::NbrbProvider;
