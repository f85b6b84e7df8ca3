//! The theme store: current theme, view flags, generation status and history.
//!
//! All mutation goes through `&mut self`, so there is exactly one writer.
//! Every edit builds a new [`Theme`] value before swapping it in; readers
//! holding a clone never see a half-applied change.
//!
//! Generation is split into [`ThemeStore::begin_generation`] and
//! [`ThemeStore::finish_generation`]. Several generations may be in flight;
//! each one commits when it finishes, so the last to finish wins.

use std::fmt;
use std::str::FromStr;

use tincture::{
    WcagCheck, auto_fix_contrast, check_wcag_aa, contrast_ratio, hex_to_oklch_triple, is_valid_hex,
};
use tracing::{debug, info, warn};

use crate::adapter::{adapt_external_to_internal, create_default_theme};
use crate::css::color_to_hex;
use crate::generator::{
    GenerateError, GenerationMode, GenerationRequest, LogoGenerator, LogoRequest, ThemeGenerator,
    default_logo_prompt,
};
use crate::history::{History, MAX_HISTORY};
use crate::intent::parse_intent;
use crate::patch::{build_tweak_prompt, patch_theme};
use crate::payload::ThemePayload;
use crate::theme::{FontsPatch, Mode, ModeSelector, Theme};
use crate::tokens::{FOREGROUND_PAIRS, foreground_token};

/// Message recorded when a generator succeeds without saying anything.
pub const GENERATION_SUCCESS_TEXT: &str = "Theme generated successfully";

/// Preview scene shown next to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scene {
    #[default]
    Cards,
    Dashboard,
    Mail,
    Pricing,
    Colors,
}

impl Scene {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Cards,
            Self::Dashboard,
            Self::Mail,
            Self::Pricing,
            Self::Colors,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Dashboard => "dashboard",
            Self::Mail => "mail",
            Self::Pricing => "pricing",
            Self::Colors => "colors",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scene {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|scene| scene.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown scene '{s}'"))
    }
}

/// Whether any generation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
}

/// Handle for one in-flight theme generation.
///
/// Carries the instruction and the theme that was current when the request
/// was issued; a tweak is patched against that snapshot.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    id: u64,
    instruction: String,
    use_base: bool,
    mode: GenerationMode,
    base: Theme,
}

impl GenerationTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

/// Contrast of one background/foreground pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairContrast {
    pub background: &'static str,
    pub foreground: &'static str,
    pub background_hex: String,
    pub foreground_hex: String,
    pub ratio: f64,
    pub check: WcagCheck,
}

/// In-memory state for one editing session.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    current: Theme,
    dark_mode: bool,
    scene: Scene,
    in_flight: usize,
    next_ticket: u64,
    last_generation_text: String,
    logo_url: Option<String>,
    history: History,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore {
    /// A store holding the default theme.
    pub fn new() -> Self {
        Self::with_history_limit(MAX_HISTORY)
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self::with_theme(create_default_theme(), limit)
    }

    /// A store starting from `theme`, which becomes the only history entry.
    pub fn with_theme(theme: Theme, history_limit: usize) -> Self {
        Self {
            history: History::with_capacity(theme.clone(), history_limit),
            current: theme,
            dark_mode: false,
            scene: Scene::default(),
            in_flight: 0,
            next_ticket: 0,
            last_generation_text: String::new(),
            logo_url: None,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn current(&self) -> &Theme {
        &self.current
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// The mode matching the dark-mode flag.
    pub fn active_mode(&self) -> &Mode {
        self.current.mode(self.dark_mode)
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn status(&self) -> GenerationStatus {
        if self.in_flight == 0 {
            GenerationStatus::Idle
        } else {
            GenerationStatus::Generating
        }
    }

    pub fn is_generating(&self) -> bool {
        self.status() == GenerationStatus::Generating
    }

    pub fn last_generation_text(&self) -> &str {
        &self.last_generation_text
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -------------------------------------------------------------------------
    // Direct writes
    // -------------------------------------------------------------------------

    /// Replace the current theme without touching history.
    pub fn set_theme(&mut self, theme: Theme) {
        info!(theme.from = %self.current.name, theme.to = %theme.name, "Theme set");
        self.current = theme;
    }

    /// Flip which mode is active. The theme itself is unchanged.
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        debug!(theme.dark = self.dark_mode, "Dark mode toggled");
    }

    pub fn set_scene(&mut self, scene: Scene) {
        debug!(scene = %scene, "Scene set");
        self.scene = scene;
    }

    /// Write one token into the selected modes and record a history entry.
    ///
    /// A `#rrggbb` value is stored in `oklch(...)` form.
    pub fn update_token(&mut self, token: &str, value: &str, modes: ModeSelector) {
        let stored = if is_valid_hex(value) {
            format!("oklch({})", hex_to_oklch_triple(value))
        } else {
            value.to_string()
        };

        let mut updated = self.current.clone();
        updated.set_token(token, &stored, modes);
        debug!(theme.token = %token, theme.value = %stored, theme.modes = %modes, "Token updated");

        self.current = updated;
        self.save_to_history();
    }

    /// Update root font families and mirror them into both modes.
    pub fn update_fonts(&mut self, fonts: &FontsPatch) {
        let mut updated = self.current.clone();
        for (token, family) in fonts.entries() {
            match token {
                "font-sans" => updated.fonts.sans = family.to_string(),
                "font-serif" => updated.fonts.serif = family.to_string(),
                _ => updated.fonts.mono = family.to_string(),
            }
            updated.set_token(token, family, ModeSelector::Both);
            debug!(theme.token = token, theme.value = %family, "Font updated");
        }
        self.current = updated;
        self.save_to_history();
    }

    pub fn update_radius(&mut self, radius: &str) {
        let mut updated = self.current.clone();
        updated.radius = radius.to_string();
        updated.set_token("radius", radius, ModeSelector::Both);
        debug!(theme.radius = %radius, "Radius updated");
        self.current = updated;
        self.save_to_history();
    }

    pub fn update_letter_spacing(&mut self, spacing: &str) {
        let mut updated = self.current.clone();
        updated.letter_spacing = spacing.to_string();
        updated.set_token("letter-spacing", spacing, ModeSelector::Both);
        debug!(theme.letter_spacing = %spacing, "Letter spacing updated");
        self.current = updated;
        self.save_to_history();
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Append the current theme to history, discarding any redo entries.
    pub fn save_to_history(&mut self) {
        self.history.push(self.current.clone());
        debug!(history.index = self.history.index(), history.len = self.history.len(), "Saved to history");
    }

    /// Restore the previous snapshot. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(theme) => {
                self.current = theme.clone();
                debug!(history.index = self.history.index(), "Undo");
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(theme) => {
                self.current = theme.clone();
                debug!(history.index = self.history.index(), "Redo");
                true
            }
            None => false,
        }
    }

    /// Go back to a fresh default theme. History keeps only that theme, so
    /// a reset cannot be undone.
    pub fn reset(&mut self) {
        let theme = create_default_theme();
        self.history.reset(theme.clone());
        self.current = theme;
        info!("Theme reset to default");
    }

    // -------------------------------------------------------------------------
    // Generation
    // -------------------------------------------------------------------------

    /// Mark a generation as in flight and build its request.
    ///
    /// With `use_base`, the request prompt carries the current theme's tokens
    /// after the instruction.
    pub fn begin_generation(
        &mut self,
        prompt: &str,
        use_base: bool,
        mode: GenerationMode,
    ) -> (GenerationTicket, GenerationRequest) {
        self.in_flight += 1;
        self.next_ticket += 1;

        let request_prompt = if use_base {
            build_tweak_prompt(prompt, &self.current)
        } else {
            prompt.to_string()
        };
        let request = GenerationRequest::new(request_prompt, use_base, mode);
        let ticket = GenerationTicket {
            id: self.next_ticket,
            instruction: prompt.to_string(),
            use_base,
            mode,
            base: self.current.clone(),
        };

        info!(
            generation.id = ticket.id,
            generation.mode = %mode,
            generation.use_base = use_base,
            generation.in_flight = self.in_flight,
            "Theme generation started"
        );
        (ticket, request)
    }

    /// Apply the outcome of a generation started with [`Self::begin_generation`].
    ///
    /// On success the new theme becomes current, the generator's message is
    /// recorded and a history entry is pushed. On failure the current theme is
    /// kept and a failure message is recorded. Either way the generation stops
    /// counting as in flight.
    ///
    /// # Errors
    /// Returns the generator's error, or `GenerateError::InvalidResponse`
    /// when the response lacks a light or dark mode.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<serde_json::Value, GenerateError>,
    ) -> Result<(), GenerateError> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let outcome =
            result.and_then(|value| ThemePayload::from_value(&value).map_err(GenerateError::from));
        match outcome {
            Ok(payload) => {
                let theme = if ticket.use_base {
                    let intent = parse_intent(&ticket.instruction);
                    patch_theme(&ticket.base, &payload, &intent)
                } else {
                    adapt_external_to_internal(&payload, &format!("Generated Theme - {}", ticket.mode))
                };

                self.set_theme(theme);
                self.last_generation_text = if payload.text.is_empty() {
                    GENERATION_SUCCESS_TEXT.to_string()
                } else {
                    payload.text
                };
                self.save_to_history();
                info!(generation.id = ticket.id, generation.in_flight = self.in_flight, "Theme generation finished");
                Ok(())
            }
            Err(err) => {
                warn!(generation.id = ticket.id, error = %err, "Theme generation failed");
                self.last_generation_text = format!("Failed to generate theme: {err}");
                Err(err)
            }
        }
    }

    /// Run a full generation against `generator`.
    ///
    /// # Errors
    /// See [`Self::finish_generation`].
    pub async fn generate_theme<G>(
        &mut self,
        generator: &G,
        prompt: &str,
        use_base: bool,
        mode: GenerationMode,
    ) -> Result<(), GenerateError>
    where
        G: ThemeGenerator + ?Sized,
    {
        let (ticket, request) = self.begin_generation(prompt, use_base, mode);
        let result = generator.generate(&request).await;
        self.finish_generation(ticket, result)
    }

    /// Generate a logo for the current theme and remember its URL.
    ///
    /// Without a prompt, a default one naming the current theme is used.
    ///
    /// # Errors
    /// Returns the generator's error; the previous logo URL is kept.
    pub async fn generate_logo<G>(
        &mut self,
        generator: &G,
        prompt: Option<&str>,
    ) -> Result<String, GenerateError>
    where
        G: LogoGenerator + ?Sized,
    {
        let theme_name = self.current.name.clone();
        let request = LogoRequest {
            prompt: prompt
                .filter(|p| !p.trim().is_empty())
                .map_or_else(|| default_logo_prompt(&theme_name), str::to_string),
            theme_name,
        };

        self.in_flight += 1;
        let result = generator.generate_logo(&request).await;
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(response) if !response.logo_url.is_empty() => {
                info!(logo.url = %response.logo_url, "Logo generated");
                self.logo_url = Some(response.logo_url.clone());
                Ok(response.logo_url)
            }
            Ok(_) => {
                let err = GenerateError::InvalidResponse("No logo URL returned".to_string());
                self.last_generation_text = format!("Failed to generate logo: {err}");
                Err(err)
            }
            Err(err) => {
                warn!(error = %err, "Logo generation failed");
                self.last_generation_text = format!("Failed to generate logo: {err}");
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Contrast
    // -------------------------------------------------------------------------

    /// Contrast of every background/foreground pair present in a mode.
    pub fn contrast_report(&self, dark: bool) -> Vec<PairContrast> {
        contrast_report(self.current.mode(dark))
    }

    /// Nudge a background's foreground until the light-mode pair passes AA,
    /// writing the result to both modes.
    ///
    /// Returns the new foreground HEX, or `None` when the token has no pair,
    /// a value is missing, or the pair already passes.
    pub fn fix_contrast(&mut self, background: &str) -> Option<String> {
        self.repair_pair(background, false, ModeSelector::Both)
    }

    /// Like [`Self::fix_contrast`], but measures and rewrites only the
    /// light or dark mode. The other mode is left as it is.
    pub fn fix_contrast_in(&mut self, background: &str, dark: bool) -> Option<String> {
        let target = if dark {
            ModeSelector::Dark
        } else {
            ModeSelector::Light
        };
        self.repair_pair(background, dark, target)
    }

    fn repair_pair(&mut self, background: &str, dark: bool, target: ModeSelector) -> Option<String> {
        let foreground = foreground_token(background)?;
        let mode = self.current.mode(dark);
        let bg_hex = color_to_hex(mode.get(background)?);
        let fg_hex = color_to_hex(mode.get(foreground)?);

        let fixed = auto_fix_contrast(&bg_hex, &fg_hex, false);
        if fixed == fg_hex {
            debug!(theme.token = foreground, theme.dark = dark, "Contrast already passes; nothing to fix");
            return None;
        }

        info!(
            theme.token = foreground,
            theme.modes = %target,
            contrast.from = %fg_hex,
            contrast.to = %fixed,
            contrast.ratio = contrast_ratio(&bg_hex, &fixed),
            "Fixed contrast"
        );
        self.update_token(foreground, &fixed, target);
        Some(fixed)
    }
}

/// Contrast of every background/foreground pair present in `mode`.
pub fn contrast_report(mode: &Mode) -> Vec<PairContrast> {
    FOREGROUND_PAIRS
        .iter()
        .filter_map(|&(background, foreground)| {
            let background_hex = color_to_hex(mode.get(background)?);
            let foreground_hex = color_to_hex(mode.get(foreground)?);
            let ratio = contrast_ratio(&background_hex, &foreground_hex);
            Some(PairContrast {
                background,
                foreground,
                background_hex,
                foreground_hex,
                ratio,
                check: check_wcag_aa(ratio, false),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedGenerator(Result<serde_json::Value, GenerateError>);

    #[async_trait]
    impl ThemeGenerator for FixedGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<serde_json::Value, GenerateError> {
            self.0.clone()
        }
    }

    fn ok_response(primary: &str) -> serde_json::Value {
        json!({
            "text": "Here you go",
            "theme": {
                "light": { "primary": primary, "background": "#ffffff" },
                "dark": { "primary": primary }
            }
        })
    }

    #[test]
    fn test_initial_state() {
        let store = ThemeStore::new();
        assert_eq!(store.current().name, "Default Theme");
        assert_eq!(store.status(), GenerationStatus::Idle);
        assert_eq!(store.scene(), Scene::Cards);
        assert!(!store.is_dark_mode());
        assert!(!store.can_undo() && !store.can_redo());
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_radius_history_sequence() {
        let mut store = ThemeStore::new();
        store.update_radius("0.1rem");
        store.update_radius("0.2rem");
        let after_second = store.current().clone();
        store.update_radius("0.3rem");

        assert!(store.undo());
        assert!(store.undo());
        assert!(store.redo());
        assert_eq!(store.current(), &after_second);
        assert_eq!(store.current().light.get("radius"), Some("0.2rem"));
    }

    #[test]
    fn test_undo_redo_boundaries_are_noops() {
        let mut store = ThemeStore::new();
        let before = store.current().clone();
        assert!(!store.undo());
        assert!(!store.redo());
        assert_eq!(store.current(), &before);
    }

    #[test]
    fn test_update_token_converts_hex() {
        let mut store = ThemeStore::new();
        store.update_token("primary", "#ffffff", ModeSelector::Light);
        assert_eq!(store.current().light.get("primary"), Some("oklch(1 0 0)"));
        assert_eq!(store.current().dark.get("primary"), Some("oklch(0.922 0 0)"));
        assert!(store.can_undo());

        store.update_token("ring", "oklch(0.5 0.1 30)", ModeSelector::Both);
        assert_eq!(store.current().dark.get("ring"), Some("oklch(0.5 0.1 30)"));
    }

    #[test]
    fn test_update_fonts_mirrors_into_modes() {
        let mut store = ThemeStore::new();
        store.update_fonts(&FontsPatch::default().serif("Merriweather"));
        let theme = store.current();
        assert_eq!(theme.fonts.serif, "Merriweather");
        assert_eq!(theme.light.get("font-serif"), Some("Merriweather"));
        assert_eq!(theme.dark.get("font-serif"), Some("Merriweather"));
        assert_eq!(theme.fonts.sans, crate::theme::DEFAULT_FONT_SANS);
    }

    #[test]
    fn test_update_letter_spacing() {
        let mut store = ThemeStore::new();
        store.update_letter_spacing("0.05em");
        assert_eq!(store.current().letter_spacing, "0.05em");
        assert_eq!(store.current().dark.get("letter-spacing"), Some("0.05em"));
    }

    #[test]
    fn test_reset_is_not_undoable() {
        let mut store = ThemeStore::new();
        store.update_radius("1rem");
        store.reset();
        assert_eq!(store.current().radius, crate::theme::DEFAULT_RADIUS);
        assert!(!store.can_undo());
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_toggle_dark_mode_switches_active_mode() {
        let mut store = ThemeStore::new();
        let theme = store.current().clone();
        store.toggle_dark_mode();
        assert!(store.is_dark_mode());
        assert_eq!(store.active_mode(), &theme.dark);
        assert_eq!(store.current(), &theme);
    }

    #[test]
    fn test_set_theme_skips_history() {
        let mut store = ThemeStore::new();
        store.set_theme(Theme::new("Other"));
        assert_eq!(store.current().name, "Other");
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_scene_parse() {
        assert_eq!("Pricing".parse::<Scene>(), Ok(Scene::Pricing));
        assert!("landing".parse::<Scene>().is_err());
    }

    #[tokio::test]
    async fn test_generate_creates_theme() {
        let mut store = ThemeStore::new();
        let generator = FixedGenerator(Ok(ok_response("#ff0000")));
        store
            .generate_theme(&generator, "bold", false, GenerationMode::Create)
            .await
            .unwrap();

        assert_eq!(store.current().name, "Generated Theme - create");
        assert_eq!(store.last_generation_text(), "Here you go");
        assert!(store.current().light.get("primary").unwrap().starts_with("oklch(0.628"));
        assert_eq!(store.status(), GenerationStatus::Idle);
        assert_eq!(store.history().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_failure_keeps_theme() {
        let mut store = ThemeStore::new();
        let before = store.current().clone();
        let generator = FixedGenerator(Err(GenerateError::Transport("connection refused".into())));
        let err = store
            .generate_theme(&generator, "bold", false, GenerationMode::Create)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Transport(_)));
        assert_eq!(store.current(), &before);
        assert_eq!(store.last_generation_text(), "Failed to generate theme: connection refused");
        assert_eq!(store.status(), GenerationStatus::Idle);
        assert_eq!(store.history().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_rejects_partial_response() {
        let mut store = ThemeStore::new();
        let generator = FixedGenerator(Ok(json!({"text": "", "theme": {"light": {}}})));
        let err = store
            .generate_theme(&generator, "x", false, GenerationMode::Create)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidResponse(_)));
        assert!(store.last_generation_text().starts_with("Failed to generate theme: Invalid theme structure"));
    }

    #[tokio::test]
    async fn test_tweak_patches_current_theme() {
        let mut store = ThemeStore::new();
        let generator = FixedGenerator(Ok(json!({
            "text": "",
            "theme": {
                "light": { "background": "#000000", "primary": "#ff0000" },
                "dark": { "background": "#000000", "primary": "#ff0000" }
            }
        })));
        let before = store.current().clone();
        store
            .generate_theme(&generator, "darker background", true, GenerationMode::Tweak)
            .await
            .unwrap();

        let theme = store.current();
        assert_eq!(theme.light.get("background"), Some("oklch(0 0 0)"));
        assert_eq!(theme.light.get("primary"), before.light.get("primary"));
        assert_eq!(theme.id, before.id);
        assert_eq!(store.last_generation_text(), GENERATION_SUCCESS_TEXT);
    }

    #[test]
    fn test_last_finisher_wins() {
        let mut store = ThemeStore::new();
        let (first, _) = store.begin_generation("one", false, GenerationMode::Create);
        let (second, request) = store.begin_generation("two", false, GenerationMode::Remix);
        assert!(store.is_generating());
        assert_eq!(request.prompt, "two");

        store.finish_generation(second, Ok(ok_response("#00ff00"))).unwrap();
        assert!(store.is_generating());
        store.finish_generation(first, Ok(ok_response("#0000ff"))).unwrap();

        assert_eq!(store.status(), GenerationStatus::Idle);
        assert_eq!(store.current().name, "Generated Theme - create");
        assert_eq!(store.history().len(), 3);
    }

    #[test]
    fn test_tweak_request_carries_base_theme() {
        let mut store = ThemeStore::new();
        let (ticket, request) = store.begin_generation("warmer", true, GenerationMode::Tweak);
        assert!(request.use_base);
        assert!(request.prompt.starts_with("warmer\n\n@[base_theme]\n"));
        assert_eq!(ticket.instruction(), "warmer");
        store
            .finish_generation(ticket, Err(GenerateError::Transport("x".into())))
            .unwrap_err();
    }

    #[test]
    fn test_contrast_report_default_theme() {
        let store = ThemeStore::new();
        let report = store.contrast_report(false);
        assert_eq!(report.len(), FOREGROUND_PAIRS.len());
        let primary = report.iter().find(|p| p.background == "primary").unwrap();
        assert!(primary.check.passes);
        assert!(primary.ratio > 10.0);
    }

    #[test]
    fn test_fix_contrast_repairs_failing_pair() {
        let mut store = ThemeStore::new();
        store.update_token("card-foreground", "#eeeeee", ModeSelector::Both);
        let history_len = store.history().len();

        let fixed = store.fix_contrast("card").unwrap();
        assert!(contrast_ratio("#ffffff", &fixed) >= 4.5);
        assert_eq!(store.history().len(), history_len + 1);

        let stored = store.current().dark.get("card-foreground").unwrap();
        assert!(stored.starts_with("oklch("));
    }

    #[test]
    fn test_fix_contrast_in_dark_leaves_passing_dark_pair() {
        let mut store = ThemeStore::new();
        let before = store.current().clone();
        assert_eq!(store.fix_contrast_in("muted", true), None);
        assert_eq!(store.current(), &before);
        assert!(store.contrast_report(true).iter().all(|p| p.check.passes));
    }

    #[test]
    fn test_fix_contrast_in_touches_only_that_mode() {
        let mut store = ThemeStore::new();
        store.update_token("card-foreground", "#333333", ModeSelector::Dark);
        let light_before = store.current().light.clone();

        let fixed = store.fix_contrast_in("card", true).unwrap();
        let dark_card = color_to_hex(store.current().dark.get("card").unwrap());
        assert!(contrast_ratio(&dark_card, &fixed) >= 4.5);
        assert_eq!(store.current().light, light_before);
        assert!(store.contrast_report(true).iter().all(|p| p.check.passes));
    }

    #[test]
    fn test_fix_contrast_noop_cases() {
        let mut store = ThemeStore::new();
        assert_eq!(store.fix_contrast("ring"), None);
        assert_eq!(store.fix_contrast("background"), None);
        assert_eq!(store.history().len(), 1);
    }
}
