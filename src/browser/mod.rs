//! Browser session plumbing
//!
//! High-level browser control through ChromiumOxide: lifecycle management,
//! navigation, and evidence capture.

pub mod capture;
pub mod controller;
pub mod navigation;

pub use capture::{CaptureFormat, CaptureOptions, CaptureResult, PageCapture};
pub use controller::{BrowserConfig, BrowserController, PageHandle};
pub use navigation::{NavigationOptions, NavigationResult, PageNavigator, UrlValidator, WaitUntil};
