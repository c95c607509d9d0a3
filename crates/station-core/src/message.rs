//! Messages and the live sources that produce them

use serde::{Deserialize, Serialize};

/// A single presentable message
///
/// The key identifies the logical message independent of its text, so a
/// message whose text was edited by a content pack still counts as seen.
/// Empty text is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    pub text: String,
}

impl Message {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// A live provider of the current message set
///
/// Re-invoked whenever a queue starts a new pass, so implementations should
/// read from the current content rather than a snapshot taken at construction.
pub trait MessageSource {
    /// Fetch the current ordered set of messages
    fn fetch(&self) -> Vec<Message>;
}

impl<F> MessageSource for F
where
    F: Fn() -> Vec<Message>,
{
    fn fetch(&self) -> Vec<Message> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_closure_source_is_live() {
        let backing = Rc::new(RefCell::new(vec![Message::new("a", "first")]));
        let source = {
            let backing = Rc::clone(&backing);
            move || backing.borrow().clone()
        };

        assert_eq!(source.fetch().len(), 1);

        backing.borrow_mut().push(Message::new("b", "second"));
        let keys: Vec<_> = source.fetch().into_iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_text_is_valid() {
        let msg = Message::new("blank", "");
        assert_eq!(msg.text, "");
        assert_eq!(msg.key, "blank");
    }

    #[test]
    fn test_message_json_shape() {
        let json = serde_json::to_string(&Message::new("k1", "Hello")).unwrap();
        assert_eq!(json, r#"{"key":"k1","text":"Hello"}"#);
    }
}
