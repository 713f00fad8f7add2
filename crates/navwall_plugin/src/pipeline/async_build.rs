//! Async Build Wrapper
//!
//! Non-blocking wrapper around `build_perimeter_timed` that runs the whole
//! build as one task on rayon's pool, delivering the result over a channel.
//!
//! The accumulation map is built and consumed entirely inside the task, so
//! classification never observes partial `use_count`s, and the in-flight
//! guard means the pipeline is never re-entered concurrently.
//!
//! # Usage
//!
//! ```ignore
//! let mut build = AsyncWallBuild::new();
//!
//! // Start processing (non-blocking); Err(BuildError::InFlight) if busy
//! build.start(snapshot, nav.clone(), ignore.clone(), config)?;
//!
//! // Poll each frame
//! if let Some(output) = build.poll() {
//!   spawn_walls(&output, &mut spawner);
//! }
//! ```

use crossbeam_channel::{self as channel, Receiver, TryRecvError};
use thiserror::Error;

use super::process::build_perimeter_timed;
use super::types::{IgnoreVolumeQuery, NavMeshQuery, WallBuildOutput};
use crate::types::{Triangulation, WallConfig};

/// The one real error surface of this crate.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
  /// A build is already running; the pipeline is never re-entered.
  #[error("a perimeter build is already in flight")]
  InFlight,
}

/// Non-blocking perimeter build runner.
pub struct AsyncWallBuild {
  /// Receiver for the pending result, `Some` while a build is in flight.
  receiver: Option<Receiver<WallBuildOutput>>,
}

impl AsyncWallBuild {
  pub fn new() -> Self {
    Self { receiver: None }
  }

  /// True while a build is in flight.
  pub fn is_busy(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start a build on rayon's pool (non-blocking).
  pub fn start<N, Q>(
    &mut self,
    triangulation: Triangulation,
    nav: N,
    ignore: Q,
    config: WallConfig,
  ) -> Result<(), BuildError>
  where
    N: NavMeshQuery + 'static,
    Q: IgnoreVolumeQuery + 'static,
  {
    if self.is_busy() {
      return Err(BuildError::InFlight);
    }

    let (sender, receiver) = channel::bounded(1);
    rayon::spawn(move || {
      let output = build_perimeter_timed(&triangulation, &nav, &ignore, &config);
      // Receiver may have been dropped by cancel; the result just vanishes.
      let _ = sender.send(output);
    });

    self.receiver = Some(receiver);
    Ok(())
  }

  /// Poll for completion (non-blocking). Returns `Some` exactly once per
  /// started build.
  pub fn poll(&mut self) -> Option<WallBuildOutput> {
    let receiver = self.receiver.as_ref()?;
    match receiver.try_recv() {
      Ok(output) => {
        self.receiver = None;
        Some(output)
      }
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => {
        self.receiver = None;
        None
      }
    }
  }

  /// Discard any pending build. The task still runs to completion on the
  /// worker; its result is dropped.
  pub fn cancel(&mut self) {
    self.receiver = None;
  }
}

impl Default for AsyncWallBuild {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "async_build_test.rs"]
mod async_build_test;
