use std::cell::RefCell;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Level, Metadata, Subscriber};

use crate::table::{Tables, Value};

thread_local! {
    static TABLES: RefCell<Tables> = RefCell::default();
}

/// Collects the fields of one event in declaration order.
#[derive(Default)]
struct RowVisitor {
    fields: Vec<(String, Value)>,
}

impl RowVisitor {
    fn put(&mut self, field: &Field, value: Value) {
        self.fields.push((field.name().to_string(), value));
    }
}

impl Visit for RowVisitor {
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Value::U64(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Value::I64(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, Value::F64(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Value::Text(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, Value::Text(format!("{value:?}")));
    }
}

/// Turns INFO-and-above events into table rows, one table per event target.
/// Spans are accepted and ignored.
pub struct CaptureSubscriber;

impl Subscriber for CaptureSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.is_event() && *metadata.level() <= Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut visitor = RowVisitor::default();
        event.record(&mut visitor);
        let target = event.metadata().target();
        TABLES.with(|tables| {
            tables.borrow_mut().table_mut(target).push_row(visitor.fields);
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Make [`CaptureSubscriber`] the global default. Returns false if a global
/// subscriber was already set.
pub fn install() -> bool {
    tracing::subscriber::set_global_default(CaptureSubscriber).is_ok()
}

/// Remove and return everything captured on this thread.
pub fn take() -> Tables {
    TABLES.with(|tables| std::mem::take(&mut *tables.borrow_mut()))
}

/// Drop everything captured on this thread.
pub fn reset() {
    TABLES.with(|tables| *tables.borrow_mut() = Tables::default());
}

/// Read the live capture without draining it.
pub fn with_tables<R>(f: impl FnOnce(&Tables) -> R) -> R {
    TABLES.with(|tables| f(&tables.borrow()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::subscriber::with_default;

    #[test]
    fn events_land_in_their_target_table() {
        reset();
        with_default(CaptureSubscriber, || {
            tracing::info!(target: "fills", tick = 1u64, price = 2.5f64, side = "buy");
            tracing::info!(target: "fills", tick = 2u64, price = 3.0f64);
            tracing::warn!(target: "alerts", level = 9i64, active = true);
            tracing::debug!(target: "fills", tick = 99u64);
        });

        let tables = take();
        let fills = tables.get("fills").unwrap();
        assert_eq!(fills.rows(), 2);
        assert_eq!(fills.u64s("tick"), Some(&[1, 2][..]));
        assert_eq!(fills.f64s("price"), Some(&[2.5, 3.0][..]));
        assert_eq!(fills.texts("side").unwrap()[1], "");

        let alerts = tables.get("alerts").unwrap();
        assert_eq!(alerts.i64s("level"), Some(&[9][..]));
        assert_eq!(alerts.bools("active"), Some(&[true][..]));

        assert!(take().is_empty());
    }

    #[test]
    fn debug_fields_are_text() {
        reset();
        with_default(CaptureSubscriber, || {
            tracing::info!(target: "debugged", state = ?Some(3));
        });
        let text = with_tables(|tables| {
            tables
                .get("debugged")
                .and_then(|t| t.texts("state"))
                .map(|v| v[0].clone())
        });
        assert_eq!(text.as_deref(), Some("Some(3)"));
        reset();
        assert_eq!(with_tables(|t| t.rows("debugged")), 0);
    }
}
