//! HTTP/3 framing metrics.
//!
//! Process-wide counters registered with metriken, exposed alongside the
//! ringline runtime metrics.

use metriken::{Counter, metric};

// ── Encoder ──────────────────────────────────────────────────────

#[metric(
    name = "ringline/h3/frames/encoded",
    description = "Total HTTP/3 frames encoded"
)]
pub static FRAMES_ENCODED: Counter = Counter::new();

#[metric(
    name = "ringline/h3/bytes/encoded",
    description = "Total HTTP/3 frame bytes encoded, payloads included"
)]
pub static BYTES_ENCODED: Counter = Counter::new();

#[metric(
    name = "ringline/h3/encode/failures",
    description = "Frames the encoder refused or the sink failed to write"
)]
pub static ENCODE_FAILURES: Counter = Counter::new();

// ── Inbound validation ───────────────────────────────────────────

#[metric(
    name = "ringline/h3/frames/forwarded",
    description = "Validated inbound frames handed to the next stage"
)]
pub static FRAMES_FORWARDED: Counter = Counter::new();

#[metric(
    name = "ringline/h3/frames/consumed",
    description = "Validated inbound control frames absorbed without forwarding"
)]
pub static FRAMES_CONSUMED: Counter = Counter::new();

#[metric(
    name = "ringline/h3/frames/rejected",
    description = "Inbound frames rejected as protocol violations"
)]
pub static FRAMES_REJECTED: Counter = Counter::new();

#[metric(
    name = "ringline/h3/frames/discarded",
    description = "Inbound frames dropped on a stream that already failed"
)]
pub static FRAMES_DISCARDED: Counter = Counter::new();

#[metric(
    name = "ringline/h3/connections/closed",
    description = "Connections closed because of an HTTP/3 protocol violation"
)]
pub static CONNECTIONS_CLOSED: Counter = Counter::new();
