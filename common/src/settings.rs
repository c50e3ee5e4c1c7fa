//! Runtime configuration: the snapshot the renderer reads and the store that
//! applies inbound settings messages.
//!
//! The phone-side settings page sends `key -> value` messages. A batch is
//! applied all-or-nothing through [`ConfigurationStore::apply`], which hands
//! back the new snapshot; the host wraps it in
//! [`EventKind::ConfigurationChanged`](crate::events::EventKind) so the face
//! redraws with it. Nothing else writes the configuration.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use thiserror::Error;

use crate::colors::{BLACK, SKY_BLUE, WHITE, from_hex, quantize_hex};

// =============================================================================
// Snapshot
// =============================================================================

/// Which hand the donut rides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpriteFollows {
    #[default]
    Seconds,
    Minutes,
}

/// Immutable configuration snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub background_color: Rgb565,
    pub hour_hand_color: Rgb565,
    pub minute_hand_color: Rgb565,
    pub center_dot_color: Rgb565,
    pub seconds_hand_enabled: bool,
    pub seconds_hand_color: Rgb565,
    pub sprite_follows: SpriteFollows,
    pub date_enabled: bool,
    pub date_background_color: Rgb565,
    pub date_text_color: Rgb565,
}

impl Configuration {
    /// Hand actually driving the donut this frame.
    ///
    /// Without a seconds hand there is nothing to ride on, so the donut moves
    /// to the minute hand regardless of the requested driver.
    pub const fn effective_sprite_driver(&self) -> SpriteFollows {
        if self.seconds_hand_enabled {
            self.sprite_follows
        } else {
            SpriteFollows::Minutes
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            background_color: SKY_BLUE,
            hour_hand_color: BLACK,
            minute_hand_color: BLACK,
            center_dot_color: BLACK,
            seconds_hand_enabled: true,
            seconds_hand_color: BLACK,
            sprite_follows: SpriteFollows::Seconds,
            date_enabled: false,
            date_background_color: WHITE,
            date_text_color: BLACK,
        }
    }
}

// =============================================================================
// Inbound Messages
// =============================================================================

/// Settings message keys, named as on the settings page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigKey {
    BackgroundColor,
    HourHandColor,
    MinuteHandColor,
    CenterDotColor,
    SecondsHandEnabled,
    SecondsHandColor,
    SpriteFollows,
    DateEnabled,
    DateBackgroundColor,
    DateTextColor,
}

impl ConfigKey {
    pub const ALL: [Self; 10] = [
        Self::BackgroundColor,
        Self::HourHandColor,
        Self::MinuteHandColor,
        Self::CenterDotColor,
        Self::SecondsHandEnabled,
        Self::SecondsHandColor,
        Self::SpriteFollows,
        Self::DateEnabled,
        Self::DateBackgroundColor,
        Self::DateTextColor,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "background_color",
            Self::HourHandColor => "hour_hand_color",
            Self::MinuteHandColor => "minute_hand_color",
            Self::CenterDotColor => "center_dot_color",
            Self::SecondsHandEnabled => "seconds_hand_enabled",
            Self::SecondsHandColor => "seconds_hand_color",
            Self::SpriteFollows => "sprite_follows",
            Self::DateEnabled => "date_enabled",
            Self::DateBackgroundColor => "date_background_color",
            Self::DateTextColor => "date_text_color",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.into_iter().find(|key| key.name() == name) }

    const fn is_color(self) -> bool {
        matches!(
            self,
            Self::BackgroundColor
                | Self::HourHandColor
                | Self::MinuteHandColor
                | Self::CenterDotColor
                | Self::SecondsHandColor
                | Self::DateBackgroundColor
                | Self::DateTextColor
        )
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Message payload. Phones send colors and toggles as plain integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigValue {
    /// `0xRRGGBB`.
    Color(u32),
    Bool(bool),
    Int(i32),
}

/// One `key -> value` pair of a settings message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigEntry {
    pub key: ConfigKey,
    pub value: ConfigValue,
}

/// Rejected settings message. The store is left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown configuration key")]
    UnknownKey,
    #[error("wrong value type for `{0}`")]
    TypeMismatch(ConfigKey),
    #[error("invalid value for `{0}`")]
    InvalidValue(ConfigKey),
    #[error("expected `key=value`")]
    Malformed,
}

impl ConfigEntry {
    pub const fn new(
        key: ConfigKey,
        value: ConfigValue,
    ) -> Self {
        Self { key, value }
    }

    /// Parse `key=value` as typed on a command line.
    ///
    /// Colors take `#RRGGBB`, `0xRRGGBB` or a decimal integer; toggles take
    /// `true`, `false`, `1` or `0`; `sprite_follows` takes `seconds` or
    /// `minutes`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let (name, raw) = text.split_once('=').ok_or(ConfigError::Malformed)?;
        let key = ConfigKey::from_name(name.trim()).ok_or(ConfigError::UnknownKey)?;
        let raw = raw.trim();

        let value = if key.is_color() {
            let hex = raw.strip_prefix('#').or_else(|| raw.strip_prefix("0x")).or_else(|| raw.strip_prefix("0X"));
            match hex {
                Some(digits) => u32::from_str_radix(digits, 16)
                    .map(ConfigValue::Color)
                    .map_err(|_| ConfigError::InvalidValue(key))?,
                None => parse_int(key, raw)?,
            }
        } else {
            match raw {
                "true" => ConfigValue::Bool(true),
                "false" => ConfigValue::Bool(false),
                "seconds" => ConfigValue::Int(0),
                "minutes" => ConfigValue::Int(1),
                _ => parse_int(key, raw)?,
            }
        };
        Ok(Self { key, value })
    }
}

fn parse_int(
    key: ConfigKey,
    raw: &str,
) -> Result<ConfigValue, ConfigError> {
    raw.parse::<i32>().map(ConfigValue::Int).map_err(|_| ConfigError::InvalidValue(key))
}

// =============================================================================
// Store
// =============================================================================

/// Owner of the live configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigurationStore {
    current: Configuration,
}

impl ConfigurationStore {
    pub const fn new(initial: Configuration) -> Self { Self { current: initial } }

    #[inline]
    pub const fn current(&self) -> Configuration { self.current }

    /// Apply a message batch. Either every entry lands or none does.
    ///
    /// Returns the new snapshot for the change notification.
    pub fn apply(
        &mut self,
        entries: &[ConfigEntry],
    ) -> Result<Configuration, ConfigError> {
        let mut next = self.current;
        for entry in entries {
            apply_entry(&mut next, *entry)?;
        }
        self.current = next;
        Ok(next)
    }
}

fn apply_entry(
    config: &mut Configuration,
    entry: ConfigEntry,
) -> Result<(), ConfigError> {
    let key = entry.key;
    if key.is_color() {
        let color = color_value(key, entry.value)?;
        let slot = match key {
            ConfigKey::BackgroundColor => &mut config.background_color,
            ConfigKey::HourHandColor => &mut config.hour_hand_color,
            ConfigKey::MinuteHandColor => &mut config.minute_hand_color,
            ConfigKey::CenterDotColor => &mut config.center_dot_color,
            ConfigKey::SecondsHandColor => &mut config.seconds_hand_color,
            ConfigKey::DateBackgroundColor => &mut config.date_background_color,
            _ => &mut config.date_text_color,
        };
        *slot = color;
        return Ok(());
    }

    match key {
        ConfigKey::SecondsHandEnabled => config.seconds_hand_enabled = bool_value(key, entry.value)?,
        ConfigKey::DateEnabled => config.date_enabled = bool_value(key, entry.value)?,
        ConfigKey::SpriteFollows => {
            config.sprite_follows = match entry.value {
                ConfigValue::Int(0) => SpriteFollows::Seconds,
                ConfigValue::Int(1) => SpriteFollows::Minutes,
                ConfigValue::Int(_) => return Err(ConfigError::InvalidValue(key)),
                _ => return Err(ConfigError::TypeMismatch(key)),
            };
        }
        _ => return Err(ConfigError::TypeMismatch(key)),
    }
    Ok(())
}

/// Colors are snapped to the 64-color palette before conversion.
fn color_value(
    key: ConfigKey,
    value: ConfigValue,
) -> Result<Rgb565, ConfigError> {
    let hex = match value {
        ConfigValue::Color(hex) => hex,
        ConfigValue::Int(int) => u32::try_from(int).map_err(|_| ConfigError::InvalidValue(key))?,
        ConfigValue::Bool(_) => return Err(ConfigError::TypeMismatch(key)),
    };
    if hex > 0xFF_FFFF {
        return Err(ConfigError::InvalidValue(key));
    }
    Ok(from_hex(quantize_hex(hex)))
}

fn bool_value(
    key: ConfigKey,
    value: ConfigValue,
) -> Result<bool, ConfigError> {
    match value {
        ConfigValue::Bool(flag) => Ok(flag),
        ConfigValue::Int(0) => Ok(false),
        ConfigValue::Int(1) => Ok(true),
        ConfigValue::Int(_) => Err(ConfigError::InvalidValue(key)),
        ConfigValue::Color(_) => Err(ConfigError::TypeMismatch(key)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
