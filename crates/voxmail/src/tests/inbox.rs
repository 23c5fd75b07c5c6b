use crate::inbox::{Inbox, InboxFilter};

/// WHAT: Filters split new and old messages
/// WHY: The inbox tabs show disjoint sets
#[test]
fn given_demo_inbox_when_filtering_then_new_and_old_partition() {
    let inbox = Inbox::demo();

    let all = inbox.filtered(InboxFilter::All, "");
    let new = inbox.filtered(InboxFilter::New, "");
    let old = inbox.filtered(InboxFilter::Old, "");

    assert_eq!(all.len(), 5);
    assert_eq!(new.len(), 3);
    assert_eq!(old.len(), 2);
    assert!(new.iter().all(|m| m.is_new));
}

/// WHAT: Search matches sender or subject, case-insensitively
/// WHY: Users type names however they like
#[test]
fn given_search_when_filtering_then_sender_and_subject_matched() {
    let inbox = Inbox::demo();

    let by_sender = inbox.filtered(InboxFilter::All, "  EMMA ");
    let by_subject = inbox.filtered(InboxFilter::All, "call");

    assert_eq!(by_sender.len(), 1);
    assert_eq!(by_sender[0].subject, "Weekly Report");
    assert_eq!(by_subject.len(), 1);
    assert_eq!(by_subject[0].sender, "David Wilson");
}

/// WHAT: Search and filter combine
/// WHY: An old-only view must not show new matches
#[test]
fn given_filter_and_search_when_no_overlap_then_empty() {
    let inbox = Inbox::demo();

    assert!(inbox.filtered(InboxFilter::Old, "sarah").is_empty());
}

/// WHAT: Marking read moves a message to old
/// WHY: Opening a message changes its tab
#[test]
fn given_new_message_when_marked_read_then_listed_as_old() {
    let mut inbox = Inbox::demo();

    assert!(inbox.mark_read("3").is_some());

    assert_eq!(inbox.unread_count(), 2);
    assert!(inbox.filtered(InboxFilter::Old, "").iter().any(|m| m.id == "3"));
    assert!(inbox.mark_read("99").is_none());
}

/// WHAT: Removing a message returns it and shrinks the inbox
/// WHY: Delete from the detail screen
#[test]
fn given_message_when_removed_then_gone() {
    let mut inbox = Inbox::demo();

    let removed = inbox.remove("5").map(|m| m.sender);

    assert_eq!(removed.as_deref(), Some("David Wilson"));
    assert_eq!(inbox.len(), 4);
    assert!(inbox.get("5").is_none());
    assert!(inbox.remove("5").is_none());
}

/// WHAT: Filter keywords parse case-insensitively
/// WHY: `inbox NEW` should work
#[test]
fn given_filter_keywords_when_parsing_then_recognized() {
    assert_eq!("NEW".parse::<InboxFilter>(), Ok(InboxFilter::New));
    assert_eq!("all".parse::<InboxFilter>(), Ok(InboxFilter::All));
    assert!("unread".parse::<InboxFilter>().is_err());
}
