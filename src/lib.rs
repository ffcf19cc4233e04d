// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          backup / list / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + env, layered      |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              github     selection  manifest
//!            HTTP list    rank, top   CSV row
//!                             |
//!                             v
//!                         pipeline
//!                    JoinSet fan-out, barrier
//!                        /         \
//!                       v           v
//!                  git::sync      archive
//!             clone/pull/fetch    zip walk
//!
//!   +-----------------------------------------+
//!   |  foundation        error, logging       |
//!   +-----------------------------------------+
//! ```

pub mod archive;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod selection;
