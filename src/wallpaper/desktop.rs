use std::fmt;
use std::str::FromStr;

/// Desktop environment whose background we manage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Desktop {
    Gnome,
    Unity,
    Kde,
    Xfce4,
    Windows,
    MacOs,
    Unknown,
}

impl Desktop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Desktop::Gnome => "gnome",
            Desktop::Unity => "unity",
            Desktop::Kde => "kde",
            Desktop::Xfce4 => "xfce4",
            Desktop::Windows => "windows",
            Desktop::MacOs => "macos",
            Desktop::Unknown => "unknown",
        }
    }

    /// Work out the running desktop. The target OS decides on Windows and
    /// macOS; elsewhere the session variables are consulted.
    pub fn detect<F>(var: &F) -> Desktop
    where
        F: Fn(&str) -> Option<String>,
    {
        if cfg!(target_os = "windows") {
            return Desktop::Windows;
        }
        if cfg!(target_os = "macos") {
            return Desktop::MacOs;
        }
        Self::from_session(var)
    }

    pub fn from_session<F>(var: &F) -> Desktop
    where
        F: Fn(&str) -> Option<String>,
    {
        // XDG_CURRENT_DESKTOP is a colon separated list, e.g. "ubuntu:GNOME"
        if let Some(current) = var("XDG_CURRENT_DESKTOP") {
            let found = current
                .split(':')
                .map(|name| from_session_name(&name.trim().to_lowercase()))
                .find(|desktop| *desktop != Desktop::Unknown);
            if let Some(desktop) = found {
                return desktop;
            }
        }

        if let Some(session) = var("DESKTOP_SESSION") {
            let desktop = from_session_name(&session.to_lowercase());
            if desktop != Desktop::Unknown {
                return desktop;
            }
        }

        if var("KDE_FULL_SESSION").as_deref() == Some("true") {
            return Desktop::Kde;
        }
        if var("GNOME_DESKTOP_SESSION_ID").is_some() {
            return Desktop::Gnome;
        }

        Desktop::Unknown
    }
}

fn from_session_name(session: &str) -> Desktop {
    match session {
        "gnome" | "gnome-xorg" | "gnome-wayland" | "cinnamon" | "budgie" => Desktop::Gnome,
        "unity" => Desktop::Unity,
        "kde" | "plasma" | "plasmawayland" | "kde-plasma" => Desktop::Kde,
        "xfce" | "xfce4" => Desktop::Xfce4,
        s if s.contains("xfce") || s.starts_with("xubuntu") => Desktop::Xfce4,
        s if s.starts_with("ubuntustudio") || s.starts_with("kubuntu") => Desktop::Kde,
        s if s.starts_with("ubuntu") => Desktop::Gnome,
        _ => Desktop::Unknown,
    }
}

impl FromStr for Desktop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gnome" => Ok(Desktop::Gnome),
            "unity" => Ok(Desktop::Unity),
            "kde" | "plasma" => Ok(Desktop::Kde),
            "xfce" | "xfce4" => Ok(Desktop::Xfce4),
            "windows" => Ok(Desktop::Windows),
            "macos" | "mac" => Ok(Desktop::MacOs),
            "unknown" => Ok(Desktop::Unknown),
            other => Err(format!(
                "unknown desktop '{}' (expected gnome, unity, kde, xfce4, windows or macos)",
                other
            )),
        }
    }
}

impl fmt::Display for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
