mod sweep_expired;

pub use sweep_expired::SweepExpiredRecordsUseCase;
