// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        sync.rs (clone -> pull -> fetch, best effort)
//!           |
//!           v
//!   ,------------------,
//!   | GitMutation      |  trait, injectable
//!   '--------+---------'
//!            |
//!            v
//!      ShellBackend  git CLI, non-interactive
//!
//!   is_working_copy   gix, no subprocess
//! ```

pub mod backend;
pub mod sync;

#[cfg(test)]
mod tests;
