pub mod add;
pub mod backup;
pub mod del;
pub mod diagnostics;
pub mod edit;
pub mod grades;
pub mod log;
pub mod orderer;
pub mod percent;
pub mod schedule;
