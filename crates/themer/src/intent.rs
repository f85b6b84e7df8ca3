//! Keyword-based intent parsing for incremental theme tweaks.
//!
//! This is a heuristic, not language understanding: the prompt is lowercased
//! and scanned for fixed substrings. Which tokens a tweak may touch is
//! decided by an ordered rule table. The first active rule that matches a
//! token decides it; tokens no rule matches fall through to the default.

use std::fmt;

use tracing::debug;

use crate::theme::ModeSelector;
use crate::tokens::{TokenGroup, is_token_in_group};

/// What a rule decides for a token it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleEffect {
    Allow,
    Deny,
}

impl RuleEffect {
    const fn allows(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Which tokens a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenMatcher {
    InGroup(TokenGroup),
    NotInGroup(TokenGroup),
    /// Token name contains the substring.
    Contains(&'static str),
}

impl TokenMatcher {
    pub fn matches(self, token: &str) -> bool {
        match self {
            Self::InGroup(group) => is_token_in_group(token, group),
            Self::NotInGroup(group) => !is_token_in_group(token, group),
            Self::Contains(needle) => token.contains(needle),
        }
    }
}

/// One guard -> effect entry: when the prompt mentions `keyword`, tokens the
/// matcher selects get `effect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenRule {
    pub keyword: &'static str,
    pub matcher: TokenMatcher,
    pub effect: RuleEffect,
}

impl TokenRule {
    pub const fn new(keyword: &'static str, matcher: TokenMatcher, effect: RuleEffect) -> Self {
        Self {
            keyword,
            matcher,
            effect,
        }
    }
}

/// Token rules in precedence order.
pub const TOKEN_RULES: [TokenRule; 10] = [
    // Naming a hue restricts the tweak to brand colors.
    TokenRule::new("blue", TokenMatcher::NotInGroup(TokenGroup::Brand), RuleEffect::Deny),
    TokenRule::new("red", TokenMatcher::NotInGroup(TokenGroup::Brand), RuleEffect::Deny),
    TokenRule::new("green", TokenMatcher::NotInGroup(TokenGroup::Brand), RuleEffect::Deny),
    TokenRule::new("background", TokenMatcher::InGroup(TokenGroup::Surfaces), RuleEffect::Allow),
    TokenRule::new("background", TokenMatcher::NotInGroup(TokenGroup::Surfaces), RuleEffect::Deny),
    TokenRule::new("brand", TokenMatcher::InGroup(TokenGroup::Brand), RuleEffect::Allow),
    TokenRule::new("brand", TokenMatcher::NotInGroup(TokenGroup::Brand), RuleEffect::Deny),
    TokenRule::new("primary", TokenMatcher::Contains("primary"), RuleEffect::Allow),
    TokenRule::new("secondary", TokenMatcher::Contains("secondary"), RuleEffect::Allow),
    TokenRule::new("accent", TokenMatcher::Contains("accent"), RuleEffect::Allow),
];

const LIGHT_KEYWORDS: [&str; 2] = ["light mode", "light only"];
const DARK_KEYWORDS: [&str; 2] = ["dark mode", "dark only"];
const SHADOW_KEYWORDS: [&str; 2] = ["shadow", "depth"];
const FONT_KEYWORDS: [&str; 3] = ["font", "typography", "text style"];

/// The permissions derived from one tweak instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub modes: ModeSelector,
    pub allow_shadows: bool,
    pub allow_fonts: bool,
    rules: Vec<TokenRule>,
    default_effect: RuleEffect,
}

impl Intent {
    /// Every mode, gate and token allowed.
    pub fn allow_all() -> Self {
        Self {
            modes: ModeSelector::Both,
            allow_shadows: true,
            allow_fonts: true,
            rules: Vec::new(),
            default_effect: RuleEffect::Allow,
        }
    }

    /// Nothing allowed: patching with this intent changes no token.
    pub fn deny_all() -> Self {
        Self {
            modes: ModeSelector::Both,
            allow_shadows: false,
            allow_fonts: false,
            rules: Vec::new(),
            default_effect: RuleEffect::Deny,
        }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: TokenRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_modes(mut self, modes: ModeSelector) -> Self {
        self.modes = modes;
        self
    }

    /// Rules active for this intent, in evaluation order.
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Whether the tweak may modify `token`.
    pub fn allows(&self, token: &str) -> bool {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(token))
            .map_or(self.default_effect, |rule| rule.effect)
            .allows()
    }

    /// Whether `token` passes both the predicate and the shadow/font gates.
    pub fn permits(&self, token: &str) -> bool {
        if !self.allows(token) {
            return false;
        }
        if token.starts_with("shadow-") && !self.allow_shadows {
            return false;
        }
        if token.starts_with("font-") && !self.allow_fonts {
            return false;
        }
        true
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keywords: Vec<&str> = self.rules.iter().map(|r| r.keyword).collect();
        write!(
            f,
            "modes={} shadows={} fonts={} rules=[{}]",
            self.modes,
            self.allow_shadows,
            self.allow_fonts,
            keywords.join(",")
        )
    }
}

/// Derive an [`Intent`] from a free-text tweak instruction.
pub fn parse_intent(prompt: &str) -> Intent {
    let lower = prompt.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    let modes = if mentions(&LIGHT_KEYWORDS) {
        ModeSelector::Light
    } else if mentions(&DARK_KEYWORDS) {
        ModeSelector::Dark
    } else {
        ModeSelector::Both
    };

    let intent = Intent {
        modes,
        allow_shadows: mentions(&SHADOW_KEYWORDS),
        allow_fonts: mentions(&FONT_KEYWORDS),
        rules: TOKEN_RULES
            .iter()
            .copied()
            .filter(|rule| lower.contains(rule.keyword))
            .collect(),
        default_effect: RuleEffect::Allow,
    };

    debug!(intent = %intent, "Parsed tweak intent");
    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::ALL_TOKENS;

    #[test]
    fn test_background_intent() {
        let intent = parse_intent("make the background darker");
        for token in ["background", "card", "popover", "muted", "sidebar"] {
            assert!(intent.allows(token), "{token} should be allowed");
        }
        for token in ["primary", "accent", "secondary", "ring", "foreground", "chart-1"] {
            assert!(!intent.allows(token), "{token} should be denied");
        }
        assert_eq!(intent.modes, ModeSelector::Both);
    }

    #[test]
    fn test_no_keywords_allows_everything() {
        let intent = parse_intent("make it more vibrant");
        assert!(ALL_TOKENS.iter().all(|t| intent.allows(t)));
        assert!(intent.rules().is_empty());
        assert!(!intent.allow_fonts);
        assert!(!intent.allow_shadows);
    }

    #[test]
    fn test_color_word_restricts_to_brand() {
        let intent = parse_intent("Use a BLUE palette");
        assert!(intent.allows("primary"));
        assert!(intent.allows("ring"));
        assert!(!intent.allows("background"));
        assert!(!intent.allows("primary-foreground"));
    }

    #[test]
    fn test_earlier_deny_beats_later_allow() {
        // "red" denies non-brand tokens before "background" could allow surfaces.
        let intent = parse_intent("red background");
        assert!(!intent.allows("background"));
        assert!(!intent.allows("primary"));
    }

    #[test]
    fn test_brand_intent() {
        let intent = parse_intent("refresh the brand");
        assert!(intent.allows("secondary"));
        assert!(!intent.allows("card"));
    }

    #[test]
    fn test_named_sub_concept_allows_matching_tokens() {
        let intent = parse_intent("tone down the accent");
        assert!(intent.allows("accent"));
        assert!(intent.allows("sidebar-accent-foreground"));
        // Nothing restrictive was named, so everything else is allowed too.
        assert!(intent.allows("card"));
    }

    #[test]
    fn test_mode_detection() {
        assert_eq!(parse_intent("tweak light mode only").modes, ModeSelector::Light);
        assert_eq!(parse_intent("Dark Mode needs more pop").modes, ModeSelector::Dark);
        assert_eq!(parse_intent("light only please, and dark mode too").modes, ModeSelector::Light);
        assert_eq!(parse_intent("make it darker").modes, ModeSelector::Both);
    }

    #[test]
    fn test_gates() {
        let intent = parse_intent("Add more depth and a serif font");
        assert!(intent.allow_shadows);
        assert!(intent.allow_fonts);
        assert!(parse_intent("change the text style").allow_fonts);
        assert!(parse_intent("softer shadows").allow_shadows);
    }

    #[test]
    fn test_permits_applies_gates() {
        let intent = parse_intent("make it pop");
        assert!(intent.allows("shadow-blur"));
        assert!(!intent.permits("shadow-blur"));
        assert!(!intent.permits("font-sans"));
        assert!(intent.permits("primary"));
    }

    #[test]
    fn test_deny_all_and_allow_all() {
        let deny = Intent::deny_all();
        let allow = Intent::allow_all();
        for token in ALL_TOKENS {
            assert!(!deny.allows(token));
            assert!(allow.permits(token));
        }
    }

    #[test]
    fn test_custom_rule_order() {
        let intent = Intent::allow_all()
            .with_rule(TokenRule::new("", TokenMatcher::Contains("chart"), RuleEffect::Deny))
            .with_modes(ModeSelector::Dark);
        assert!(!intent.allows("chart-3"));
        assert!(intent.allows("primary"));
        assert_eq!(intent.modes, ModeSelector::Dark);
    }

    #[test]
    fn test_display_lists_active_rules() {
        let text = parse_intent("background").to_string();
        assert!(text.contains("rules=[background,background]"));
    }
}
