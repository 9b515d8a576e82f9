//! `IFactReader` — the read-only combined view of the fact base. Rule
//! authors and report renderers (out of scope here; spec.md 1) consume the
//! fact base exclusively through this surface or through arbitrary SQL
//! against a read-only connection (spec.md 6).

use super::calls::IFactCalls;
use super::cfg::IFactCfg;
use super::files::IFactFiles;
use super::findings::IFactFindings;
use super::frameworks::IFactFrameworks;
use super::graph::IFactGraph;
use super::symbols::IFactSymbols;

/// Everything a read-only consumer needs. Implemented by
/// `DriftStorageEngine` and by any read-only connection wrapper.
pub trait IFactReader:
    IFactFiles + IFactSymbols + IFactCalls + IFactFrameworks + IFactCfg + IFactGraph + IFactFindings
{
}

impl<T> IFactReader for T where
    T: IFactFiles + IFactSymbols + IFactCalls + IFactFrameworks + IFactCfg + IFactGraph + IFactFindings
{
}
