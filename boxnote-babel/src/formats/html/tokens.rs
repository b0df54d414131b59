//! Tag-stream tokenizer
//!
//! Flattens markup into start-tag / end-tag / text events using the html5ever tokenizer (no
//! tree construction). Character references are decoded, tag and attribute names lowercased,
//! adjacent character tokens merged into one text event, and a self-closing tag yields a start
//! event immediately followed by its end event.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::interface::TokenizerResult;
use log::debug;
use std::cell::RefCell;
use std::fmt;

/// One event of the tag stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(String),
}

impl TagEvent {
    pub fn start(name: &str, attrs: &[(&str, &str)]) -> Self {
        TagEvent::Start {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> Self {
        TagEvent::End {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        TagEvent::Text(text.to_string())
    }
}

impl fmt::Display for TagEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagEvent::Start { name, attrs } => {
                write!(f, "<{name}")?;
                for (key, value) in attrs {
                    write!(f, " {key}={value:?}")?;
                }
                write!(f, ">")
            }
            TagEvent::End { name } => write!(f, "</{name}>"),
            TagEvent::Text(text) => write!(f, "{text:?}"),
        }
    }
}

#[derive(Default)]
struct EventSink {
    events: RefCell<Vec<TagEvent>>,
    text: RefCell<String>,
}

impl EventSink {
    fn flush_text(&self) {
        let text = std::mem::take(&mut *self.text.borrow_mut());
        if !text.is_empty() {
            self.events.borrow_mut().push(TagEvent::Text(text));
        }
    }

    fn push_tag(&self, tag: Tag) {
        let name = tag.name.to_string();
        let mut events = self.events.borrow_mut();
        match tag.kind {
            TagKind::StartTag => {
                let attrs = tag
                    .attrs
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                events.push(TagEvent::Start {
                    name: name.clone(),
                    attrs,
                });
                if tag.self_closing {
                    events.push(TagEvent::End { name });
                }
            }
            TagKind::EndTag => events.push(TagEvent::End { name }),
        }
    }
}

impl TokenSink for EventSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => self.text.borrow_mut().push_str(&text),
            Token::TagToken(tag) => {
                self.flush_text();
                self.push_tag(tag);
            }
            Token::EOFToken => self.flush_text(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenize markup into its tag stream.
pub fn tokenize(markup: &str) -> Vec<TagEvent> {
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(markup));

    let tokenizer = Tokenizer::new(EventSink::default(), TokenizerOpts::default());
    while let TokenizerResult::Script(()) = tokenizer.feed(&queue) {
        debug!("tokenizer paused at a script, resuming");
    }
    tokenizer.end();

    tokenizer.sink.flush_text();
    tokenizer.sink.events.take()
}
