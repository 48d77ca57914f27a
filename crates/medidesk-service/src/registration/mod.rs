//! Patient registration: number allocation and record creation.

pub mod allocator;
pub mod service;

pub use allocator::SequenceAllocator;
pub use service::RegistrationService;
