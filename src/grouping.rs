//! Render plan for a channel's message list.
//!
//! Every message gets a [`RenderDecision`] computed from itself and the
//! message that follows it:
//!
//! - a header (avatar, sender, timestamp) is shown when the next message is
//!   from someone else, falls on another calendar day, or does not exist;
//! - a day divider is shown when the next message falls on another calendar
//!   day, and always comes with a header;
//! - everything else collapses into the block of the same sender.
//!
//! The pass is a pure function of the slice, so the view simply reruns it
//! whenever the list changes.

use chrono::{FixedOffset, NaiveDateTime};

use crate::datefmt::{day_divider_label, local_datetime, message_timestamp, same_day};
use crate::message::Message;

/// How one message is laid out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderDecision {
    pub show_header: bool,
    pub show_day_divider: bool,
    /// Present when a divider is shown and the message's day is known.
    pub day_divider_label: Option<String>,
    /// Header timestamp; empty when the message time is not representable.
    pub timestamp_label: String,
}

/// Build the render plan for `messages`, one decision per message.
pub fn build_render_plan(messages: &[Message], offset: FixedOffset) -> Vec<RenderDecision> {
    let times: Vec<Option<NaiveDateTime>> = messages
        .iter()
        .map(|m| local_datetime(m.created_at, offset))
        .collect();

    messages
        .iter()
        .enumerate()
        .map(|(i, msg)| {
            let current = times[i];
            let (different_user, different_day) = match messages.get(i + 1) {
                Some(next) => (
                    next.user_id != msg.user_id,
                    !same_day(current.map(|t| t.date()), times[i + 1].map(|t| t.date())),
                ),
                // Nothing to look at past the end
                None => (true, false),
            };

            RenderDecision {
                show_header: different_user || different_day,
                show_day_divider: different_day,
                day_divider_label: if different_day {
                    current.map(|t| day_divider_label(t.date()))
                } else {
                    None
                },
                timestamp_label: current.map(message_timestamp).unwrap_or_default(),
            }
        })
        .collect()
}

/// Number of day dividers in a plan.
pub fn count_day_dividers(plan: &[RenderDecision]) -> usize {
    plan.iter().filter(|d| d.show_day_divider).count()
}
