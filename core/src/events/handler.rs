use super::ClientEvent;

/// Receives host events.
///
/// Implementors match on the events they care about and ignore the rest.
pub trait EventHandler {
    fn handle_event(&mut self, event: &ClientEvent);

    fn handle_events(&mut self, events: &[ClientEvent]) {
        for event in events {
            self.handle_event(event);
        }
    }
}
