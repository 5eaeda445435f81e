//! Delay profiles and the rebuildable lookup cache over them.
//!
//! A [`DelayProfile`] is a user-authored timing policy: a delay-per-length
//! constant for every copper layer, a default via delay-per-length constant,
//! and a list of exact via overrides. Profiles live in a
//! [`DelayProfileStore`] owned by project settings.
//!
//! The [`DelayProfileCache`] indexes a store by profile name and, per profile,
//! by [`ViaOverrideKey`]. It is rebuilt wholesale whenever settings change
//! (see [`SettingsObserver`]) and is never updated incrementally.

#![warn(missing_docs)]

pub mod cache;
pub mod profile;
pub mod store;

pub use cache::{CachedProfile, DelayProfileCache, SettingsObserver};
pub use profile::{DelayProfile, ViaOverrideEntry, ViaOverrideKey};
pub use store::DelayProfileStore;
