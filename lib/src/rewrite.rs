use std::borrow::Cow;

use memchr::memmem;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// An ordered literal search/replace pair. Rules carry no regex syntax:
/// `pattern` matches byte-for-byte, every occurrence.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub pattern: String,
    pub replace: String,
}

impl Rule {
    pub fn new<P, R>(pattern: P, replace: R) -> Self
        where P: Into<String>, R: Into<String>
    {
        Rule { pattern: pattern.into(), replace: replace.into() }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: Rule,
    finder: memmem::Finder<'static>,
}

impl CompiledRule {
    fn new(rule: Rule) -> Self {
        let finder = memmem::Finder::new(rule.pattern.as_bytes()).into_owned();
        CompiledRule { rule, finder }
    }

    /// Replace every occurrence of the pattern. Matches are found left to
    /// right and replaced text is never rescanned, so a replacement cannot
    /// feed this same rule again.
    fn apply<'t>(&self, input: Cow<'t, str>) -> (Cow<'t, str>, usize) {
        let hits: Vec<usize> = self.finder.find_iter(input.as_bytes()).collect();
        if hits.is_empty() {
            return (input, 0);
        }

        let mut output = String::with_capacity(input.len() + hits.len() * self.rule.replace.len());
        let mut tail = 0;
        for &hit in &hits {
            output.push_str(&input[tail..hit]);
            output.push_str(&self.rule.replace);
            tail = hit + self.rule.pattern.len();
        }

        output.push_str(&input[tail..]);
        (Cow::Owned(output), hits.len())
    }
}

/// An ordered sequence of compiled [`Rule`]s, applied one after another to
/// a full document.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

/// The outcome of [`RuleSet::apply`]: the (possibly borrowed) resulting
/// text and the number of replacements made per rule, in rule order.
#[derive(Debug)]
pub struct Rewritten<'t> {
    pub text: Cow<'t, str>,
    pub counts: Vec<usize>,
}

impl Rewritten<'_> {
    /// `true` iff at least one rule matched.
    pub fn modified(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(CompiledRule::new(rule));
    }

    pub fn with(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|compiled| compiled.rule.pattern.as_str())
    }

    /// Apply every rule, in order, to `text`. Pure: no I/O, no shared
    /// state. Returns borrowed text when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> Rewritten<'t> {
        let mut text = Cow::Borrowed(text);
        let mut counts = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let (next, count) = rule.apply(text);
            text = next;
            counts.push(count);
        }

        Rewritten { text, counts }
    }
}

static SITE_RULES: Lazy<RuleSet> = Lazy::new(|| RuleSet::new()
    .with(Rule::new("href=\"/_assets", "href=\"./_assets"))
    .with(Rule::new(".md", ".html"))
    .with(Rule::new("README.html", "index.html")));

/// The rules that make a server-rooted render viewable from any base
/// path: asset references become relative and cross-page links point at
/// the rendered `.html` files. Links to the readme page follow it to its
/// promoted home at `index.html`.
///
/// The order matters for readme links: `README.md` first becomes
/// `README.html` and then `index.html`.
pub fn site_relocation() -> &'static RuleSet {
    &SITE_RULES
}
