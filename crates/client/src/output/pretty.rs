//! Pretty output formatting.

use crate::client::announcements::Announcement;
use crate::client::conversations::Conversation;
use crate::client::messages::Message;
use crate::client::notifications::Notification;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Format a conversation for display.
pub fn format_conversation(conversation: &Conversation) -> String {
    let mut output = format!(
        "Conversation {}\n  Participants: {}",
        conversation.id().unwrap_or("-"),
        conversation.participants().join(", ")
    );
    if let Some(distinct) = conversation.distinct() {
        output.push_str(&format!("\n  Distinct: {}", distinct));
    }
    if let Some(created_at) = conversation.created_at() {
        output.push_str(&format!("\n  Created: {}", created_at.format(TIME_FORMAT)));
    }
    if let Some(metadata) = conversation.metadata() {
        output.push_str(&format!("\n  Metadata: {}", metadata));
    }
    output
}

/// Format a message for display.
pub fn format_message(message: &Message) -> String {
    let sender = message
        .sender_user_id()
        .or_else(|| message.sender_name())
        .unwrap_or("unknown");
    let mut output = format!(
        "Message {}\n  Conversation: {}\n  From: {}",
        message.id().unwrap_or("-"),
        message.conversation_id().unwrap_or("-"),
        sender
    );
    if let Some(sent_at) = message.sent_at() {
        output.push_str(&format!("\n  Sent: {}", sent_at.format(TIME_FORMAT)));
    }
    for part in message.parts() {
        output.push_str(&format!("\n  [{}] {}", part.mime_type, part.body));
    }
    output
}

/// Format messages for display.
pub fn format_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages found.".to_string();
    }
    let mut output = format!("MESSAGES ({})\n", messages.len());
    output.push_str(&"-".repeat(40));
    for message in messages {
        output.push_str(&format!("\n{}", format_message(message)));
        output.push('\n');
    }
    output
}

/// Format an announcement for display.
pub fn format_announcement(announcement: &Announcement) -> String {
    let mut output = format!(
        "Announcement {}\n  From: {}\n  Recipients: {}",
        announcement.id().unwrap_or("-"),
        announcement.sender_name().unwrap_or("unknown"),
        announcement.recipients().join(", ")
    );
    for part in announcement.parts() {
        output.push_str(&format!("\n  [{}] {}", part.mime_type, part.body));
    }
    output
}

/// Format a notification for display.
pub fn format_notification(notification: &Notification) -> String {
    let text = notification
        .notification()
        .and_then(|n| n.get("text"))
        .and_then(|text| text.as_str())
        .unwrap_or("");
    format!(
        "Notification {}\n  Recipients: {}\n  Text: {}",
        notification.id().unwrap_or("-"),
        notification.recipients().join(", "),
        text
    )
}
