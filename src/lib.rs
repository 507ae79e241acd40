//! Core library for the `prettify` itinerary converter.
//!
//! An itinerary is plain text carrying shorthand markers: airport codes
//! (`#LHR`, `##EGLL`), city codes (`*#LHR`, `*##EGLL`) and date/time markers
//! (`D(...)`, `T12(...)`, `T24(...)`). The modules are kept narrow: lookup
//! and document IO live under [`itinerary::prettify::io`], shared types in
//! [`itinerary::prettify::model`], the two substitution passes in
//! [`itinerary::prettify::codes`] and [`itinerary::prettify::datetime`], and
//! the per-document orchestration in [`itinerary::prettify::assemble`].

pub mod itinerary;

pub use itinerary::prettify::{
    PrettifyError, Result, assemble, codes, datetime, error, io, model, prompt,
};
