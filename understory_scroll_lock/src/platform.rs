// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-agent and platform sniffing for the browser families that need
//! scroll workarounds.

use alloc::string::String;

/// What the host knows about the browser it runs in.
///
/// All predicates degrade to `false` when the strings are empty, so a host
/// that cannot sniff simply skips every workaround.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Platform {
    /// `navigator.userAgent` or equivalent.
    pub user_agent: String,
    /// `navigator.platform` or equivalent (`"iPhone"`, `"MacIntel"`, ...).
    pub platform: String,
    /// Maximum simultaneous touch points reported by the device.
    pub max_touch_points: u32,
    /// Whether the page runs as an installed app (`display-mode: standalone`).
    pub standalone: bool,
}

impl Platform {
    /// Creates a platform description from user agent and platform strings.
    #[must_use]
    pub fn new(user_agent: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            platform: platform.into(),
            max_touch_points: 0,
            standalone: false,
        }
    }

    /// Sets the reported touch point count.
    #[must_use]
    pub fn with_max_touch_points(mut self, points: u32) -> Self {
        self.max_touch_points = points;
        self
    }

    /// Marks the page as running in standalone (installed app) mode.
    #[must_use]
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Safari-family engine: a `safari` token not preceded by `chrome` or
    /// `android` (case-insensitive). Every browser on iOS matches.
    #[must_use]
    pub fn is_safari(&self) -> bool {
        let ua = self.user_agent.to_ascii_lowercase();
        let Some(safari) = ua.find("safari") else {
            return false;
        };
        let head = &ua[..safari];
        !head.contains("chrome") && !head.contains("android")
    }

    /// iPhone or iPad.
    #[must_use]
    pub fn is_ios(&self) -> bool {
        self.is_iphone() || self.is_ipad()
    }

    /// `navigator.platform` starts with `iPhone`.
    #[must_use]
    pub fn is_iphone(&self) -> bool {
        self.platform.starts_with("iPhone")
    }

    /// iPad, including iPadOS reporting itself as a touch-capable Mac.
    #[must_use]
    pub fn is_ipad(&self) -> bool {
        self.platform.starts_with("iPad") || (self.is_mac() && self.max_touch_points > 1)
    }

    /// `navigator.platform` starts with `Mac`.
    #[must_use]
    pub fn is_mac(&self) -> bool {
        self.platform.starts_with("Mac")
    }

    /// Firefox on a phone (Android `Mobile` builds or `FxiOS`).
    #[must_use]
    pub fn is_mobile_firefox(&self) -> bool {
        let ua = &self.user_agent;
        ua.contains("FxiOS") || (ua.contains("Firefox") && ua.contains("Mobile"))
    }
}
