// rmm-rs: RimWorld Mod Manager
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
//!                |        list / order / export / convert
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, RMM_* env, CLI    |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               scan        store     order
//!          About.xml --> ModCollection --> graph --> resolve
//!             |           |
//!             |           v
//!             |         list
//!             |    v1 / v2 / v3 codecs
//!             |    FormatRegistry
//!             v
//!   +-----------------------------------------+
//!   |  model   ModRecord, ModCollection       |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod list;
pub mod logging;
pub mod model;
pub mod order;
pub mod scan;
pub mod store;
pub mod utility;
