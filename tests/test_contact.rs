//! Integration tests for the contact form.

mod common;

use common::FakeBackend;
use teentops_sdk::contact::{ContactField, ContactFlow, Feedback};
use teentops_sdk::{Language, Translator};

fn filled() -> ContactFlow {
    let mut flow = ContactFlow::new();
    flow.set_field(ContactField::Name, "Yassine");
    flow.set_field(ContactField::Email, "yassine@example.com");
    flow.set_field(ContactField::Message, "Do you ship to Sfax?");
    flow
}

#[test]
fn test_success_clears_form() {
    let t = Translator::new(Language::Fr);
    let backend = FakeBackend::new();
    let mut flow = filled();

    assert!(flow.submit(&backend, &t));
    assert_eq!(flow.feedback(), Some(&Feedback::Success(t.t("contact_success").to_string())));
    assert!(flow.form().name.is_empty());
    assert!(flow.form().message.is_empty());

    let sent = backend.messages.lock().unwrap();
    assert_eq!(sent[0].message, "Do you ship to Sfax?");
    assert_eq!(sent[0].phone, "");
}

#[test]
fn test_failure_keeps_form() {
    let t = Translator::new(Language::Ar);
    let backend = FakeBackend::failing();
    let mut flow = filled();

    assert!(!flow.submit(&backend, &t));
    let feedback = flow.feedback().unwrap();
    assert!(!feedback.is_success());
    assert_eq!(feedback.message(), t.t("contact_error"));
    assert_eq!(flow.form().name, "Yassine");
}

#[test]
fn test_required_fields_block_submission() {
    let t = Translator::default();
    let backend = FakeBackend::new();
    let mut flow = ContactFlow::new();
    flow.set_field(ContactField::Name, "   ");
    flow.set_field(ContactField::Email, "x@example.com");

    assert!(!flow.submit(&backend, &t));
    assert!(flow.error(ContactField::Name).is_some());
    assert!(flow.error(ContactField::Message).is_some());
    assert!(flow.error(ContactField::Email).is_none());
    assert!(flow.feedback().is_none());
    assert!(backend.messages.lock().unwrap().is_empty());

    flow.set_field(ContactField::Message, "Hello");
    assert!(flow.error(ContactField::Message).is_none());
}
