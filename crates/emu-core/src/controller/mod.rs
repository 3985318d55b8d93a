mod boot_observer;
mod lifecycle_controller;

pub use lifecycle_controller::LifecycleController;
