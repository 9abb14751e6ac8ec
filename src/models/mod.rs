pub mod backup;
pub mod child;
pub mod chore;
pub mod completed_chore;
pub mod icon;
pub mod stats;
