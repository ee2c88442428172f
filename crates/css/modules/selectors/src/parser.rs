//! Selector text parsing into segment paths.

use crate::{Combinator, ComplexSelector, SelectorList, SelectorSegment};
use core::mem::take;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Internal tokenizer token kinds.
enum Tok {
    /// An explicit child/adjacent/general sibling combinator.
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWS,
    /// `*`
    Universal,
    /// A type selector, already lowercased.
    Type(String),
    /// `.name`
    Class(String),
    /// `#name`
    Id(String),
    /// `:name` (a doubled colon is accepted and treated the same).
    PseudoClass(String),
}

/// Tokenizer over a selector string.
struct SelectorTokenizer<'input> {
    /// Underlying bytes of the selector.
    input_bytes: &'input [u8],
    /// Current cursor index into `input_bytes`.
    index: usize,
}

impl<'input> SelectorTokenizer<'input> {
    #[inline]
    const fn new(input: &'input str) -> Self {
        Self {
            input_bytes: input.as_bytes(),
            index: 0,
        }
    }

    /// Return the next selector token, if any. Unsupported syntax is skipped.
    fn next_token(&mut self) -> Option<Tok> {
        loop {
            if self.skip_spaces() && self.index < self.input_bytes.len() {
                return Some(Tok::DescendantWS);
            }
            let &current = self.input_bytes.get(self.index)?;
            match current {
                b'*' => {
                    self.advance();
                    return Some(Tok::Universal);
                }
                b'.' => {
                    self.advance();
                    return Some(Tok::Class(self.consume_ident()));
                }
                b'#' => {
                    self.advance();
                    return Some(Tok::Id(self.consume_ident()));
                }
                b':' => {
                    while self.input_bytes.get(self.index) == Some(&b':') {
                        self.advance();
                    }
                    return Some(Tok::PseudoClass(self.consume_ident()));
                }
                b'>' => {
                    self.advance();
                    return Some(Tok::Combinator(Combinator::Child));
                }
                b'+' => {
                    self.advance();
                    return Some(Tok::Combinator(Combinator::AdjacentSibling));
                }
                b'~' => {
                    self.advance();
                    return Some(Tok::Combinator(Combinator::GeneralSibling));
                }
                b'[' => {
                    // Attribute selectors are not part of the segment model.
                    while self
                        .input_bytes
                        .get(self.index)
                        .is_some_and(|&byte| byte != b']')
                    {
                        self.advance();
                    }
                    self.advance();
                }
                byte if is_ident_byte(byte) => {
                    return Some(Tok::Type(self.consume_ident().to_ascii_lowercase()));
                }
                _ => self.advance(),
            }
        }
    }

    #[inline]
    fn advance(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    /// Consume an identifier consisting of ASCII alphanumerics, '-' and '_'.
    fn consume_ident(&mut self) -> String {
        let start = self.index;
        while self
            .input_bytes
            .get(self.index)
            .is_some_and(|&byte| is_ident_byte(byte))
        {
            self.advance();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).into_owned()
    }

    /// Skip ASCII whitespace, returning whether any was skipped.
    fn skip_spaces(&mut self) -> bool {
        let start = self.index;
        while self
            .input_bytes
            .get(self.index)
            .is_some_and(u8::is_ascii_whitespace)
        {
            self.advance();
        }
        self.index != start
    }
}

const fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

/// Parse a selector list from rule text.
///
/// Parts that produce no segments are dropped.
pub fn parse_selector_list(input: &str) -> SelectorList {
    let selectors = input
        .split(',')
        .map(|part| parse_complex_selector(part.trim()))
        .filter(|sel| !sel.is_empty())
        .collect();
    SelectorList { selectors }
}

/// Parse one complex selector (very permissive, never fails).
///
/// The leftmost segment always carries the descendant combinator, relating it to
/// the implicit root.
pub fn parse_complex_selector(input: &str) -> ComplexSelector {
    let mut tokens = SelectorTokenizer::new(input);
    let mut segments: Vec<SelectorSegment> = Vec::new();
    let mut current = SelectorSegment::default();
    let mut has_current = false;
    let mut pending_combinator: Option<Combinator> = None;

    while let Some(token) = tokens.next_token() {
        let simple = match token {
            Tok::Combinator(comb) => {
                pending_combinator = Some(comb);
                continue;
            }
            Tok::DescendantWS => {
                // Whitespace around an explicit combinator must not override it.
                pending_combinator.get_or_insert(Combinator::Descendant);
                continue;
            }
            simple => simple,
        };
        if let Some(comb) = pending_combinator.take()
            && has_current
        {
            segments.push(take(&mut current));
            current.combinator = comb;
        }
        has_current = true;
        match simple {
            Tok::Type(tag) => current.tag = tag,
            Tok::Id(id) => current.id = id,
            Tok::Class(class) => current.add_class(&class),
            Tok::PseudoClass(pseudo_class) => current.add_pseudo_class(&pseudo_class),
            Tok::Universal | Tok::Combinator(_) | Tok::DescendantWS => {}
        }
    }
    if has_current {
        segments.push(current);
    }
    if let Some(first) = segments.first_mut() {
        first.combinator = Combinator::Descendant;
    }
    ComplexSelector { segments }
}
