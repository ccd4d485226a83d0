use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("askdoc.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("askdoc.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("askdoc.client.request_duration_seconds");
pub(crate) static INGEST_BYTES: Moments = Moments::new("askdoc.client.ingest_request_bytes");
pub(crate) static INGEST_CHUNKS: Moments = Moments::new("askdoc.client.ingest_chunks");

pub(crate) static SESSIONS_CREATED: Counter = Counter::new("askdoc.session.created");
pub(crate) static QUESTIONS_ASKED: Counter = Counter::new("askdoc.session.questions");
pub(crate) static EMPTY_ANSWERS: Counter = Counter::new("askdoc.session.empty_answers");
pub(crate) static HISTORY_LOADS: Counter = Counter::new("askdoc.session.history_loads");

pub(crate) static REVEAL_TICKS: Counter = Counter::new("askdoc.render.reveal_ticks");
pub(crate) static REVEAL_CANCELLED: Counter = Counter::new("askdoc.render.reveal_cancelled");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
    collector.register_moments(&INGEST_BYTES);
    collector.register_moments(&INGEST_CHUNKS);

    collector.register_counter(&SESSIONS_CREATED);
    collector.register_counter(&QUESTIONS_ASKED);
    collector.register_counter(&EMPTY_ANSWERS);
    collector.register_counter(&HISTORY_LOADS);

    collector.register_counter(&REVEAL_TICKS);
    collector.register_counter(&REVEAL_CANCELLED);
}
