//! Frame-diff and update protocol.
//!
//! This module decides, per client and refresh cycle, whether a display
//! gets nothing, a full frame or a byte-aligned partial region:
//! - [`diff`]: XOR masks, bounding boxes, grid alignment and region packing
//! - [`packet`]: wire framing of [`UpdatePacket`]s
//! - [`cache`]: per-client [`ClientFrameState`] behind per-client locks
//! - [`schedule`]: time-of-day sleep policy

pub mod cache;
pub mod diff;
pub mod packet;
pub mod schedule;
pub mod types;


use chrono::NaiveDateTime;

use crate::util::Rect;

pub use cache::{ClientFrameState, FrameCache};
pub use packet::{Payload, UpdatePacket};
pub use schedule::{SleepSchedule, refresh_slot};
pub use types::{Opcode, PROTOCOL_TAG, ProtocolError, ProtocolSettings};

/// A packet together with its serialized bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub packet: UpdatePacket,
    pub bytes: Vec<u8>,
}

impl Update {
    pub fn opcode(&self) -> Opcode {
        self.packet.opcode()
    }
}

/// Turns rendered frames into update packets for display clients.
#[derive(Debug, Clone)]
pub struct UpdateProtocol {
    settings: ProtocolSettings,
    schedule: SleepSchedule,
    cache: FrameCache,
}

impl UpdateProtocol {
    pub fn new(settings: ProtocolSettings, schedule: SleepSchedule) -> Self {
        Self::with_cache(settings, schedule, FrameCache::new())
    }

    /// Builds a protocol around an existing cache (e.g. one shared with a
    /// transport that invalidates clients).
    pub fn with_cache(
        settings: ProtocolSettings,
        schedule: SleepSchedule,
        cache: FrameCache,
    ) -> Self {
        Self {
            settings,
            schedule,
            cache,
        }
    }

    pub fn settings(&self) -> &ProtocolSettings {
        &self.settings
    }

    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    fn check_frame(&self, frame: &[u8]) -> Result<(), ProtocolError> {
        let expected = self.settings.frame_len();
        if frame.len() != expected {
            return Err(ProtocolError::FrameLength {
                expected,
                actual: frame.len(),
            });
        }
        Ok(())
    }

    /// Records `frame` as what `client` currently shows, as of `now`.
    pub async fn seed(
        &self,
        client: &str,
        frame: &[u8],
        now: NaiveDateTime,
    ) -> Result<(), ProtocolError> {
        self.check_frame(frame)?;
        let mut state = self.cache.lock(client).await;
        state.last_frame = Some(frame.to_vec());
        state.last_refresh_slot = Some(refresh_slot(now, self.settings.full_refresh_minutes));
        Ok(())
    }

    /// Forces the next update for `client` to be full.
    pub async fn invalidate(&self, client: &str) {
        self.cache.invalidate(client).await;
    }

    /// Chooses and serializes the update for `client`.
    ///
    /// The client's cache entry stays locked from the diff until the new
    /// frame is stored, and is only written once the packet has been built.
    pub async fn build_update(
        &self,
        client: &str,
        frame: &[u8],
        now: NaiveDateTime,
    ) -> Result<Update, ProtocolError> {
        self.check_frame(frame)?;
        let slot = refresh_slot(now, self.settings.full_refresh_minutes);
        let sleep_minutes = self.schedule.sleep_minutes(now.time());

        let mut state = self.cache.lock(client).await;
        let payload = self.choose_payload(&state, frame, slot);
        let packet = UpdatePacket {
            sleep_minutes,
            payload,
        };
        let bytes = packet.encode()?;

        state.last_frame = Some(frame.to_vec());
        state.last_refresh_slot = Some(slot);
        drop(state);

        log::info!(
            "Update for '{}': {:?}, {} bytes, sleep {} min",
            client,
            packet.opcode(),
            bytes.len(),
            sleep_minutes
        );
        Ok(Update { packet, bytes })
    }

    fn choose_payload(&self, state: &ClientFrameState, frame: &[u8], slot: i64) -> Payload {
        if state.last_refresh_slot != Some(slot) {
            log::debug!("New refresh slot {}, sending full frame", slot);
            return Payload::Full(frame.to_vec());
        }
        let Some(previous) = state.last_frame.as_deref() else {
            log::debug!("No cached frame, sending full frame");
            return Payload::Full(frame.to_vec());
        };
        if diff::are_identical(previous, frame) {
            return Payload::NoOp;
        }

        let mask = diff::xor(previous, frame);
        let Some(bounds) = diff::bounding_box(&mask, self.settings.width, self.settings.height)
        else {
            return Payload::NoOp;
        };
        let aligned = diff::align_to_byte_grid(bounds);
        if aligned.area() > self.settings.max_partial_pixels {
            log::debug!(
                "Changed region {:?} covers {} px (> {}), sending full frame",
                aligned,
                aligned.area(),
                self.settings.max_partial_pixels
            );
            return Payload::Full(frame.to_vec());
        }

        if !fits_partial_header(previous.len(), aligned) {
            log::debug!(
                "Partial header cannot describe {:?} with a {} byte frame, sending full frame",
                aligned,
                previous.len()
            );
            return Payload::Full(frame.to_vec());
        }

        Payload::Partial {
            bounds: aligned,
            previous: previous.to_vec(),
            region: diff::pack_region(frame, aligned, self.settings.width),
        }
    }
}

/// Whether every Partial header field is representable as a u16.
fn fits_partial_header(previous_len: usize, bounds: Rect) -> bool {
    let max = u16::MAX as i64;
    previous_len as u64 <= u16::MAX as u64
        && [bounds.x, bounds.y, bounds.width, bounds.height]
            .into_iter()
            .all(|field| (0..=max).contains(&(field as i64)))
}
