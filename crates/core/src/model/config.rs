//! Printer and label-geometry configuration.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::{ValidationError, positive, within};

// ── Interface kind ──────────────────────────────────────────────────────

/// How the printer is reached. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    /// USB printer, optionally selected by serial.
    #[default]
    Usb,
    /// Network printer at an IP address.
    Network,
    /// Printer installed under an operating-system driver name.
    Driver,
    /// USB printer with an RFID encoder.
    RfidUsb,
    /// Network printer with an RFID encoder.
    RfidNetwork,
}

impl InterfaceKind {
    /// All kinds in code order.
    pub const ALL: &'static [InterfaceKind] = &[
        InterfaceKind::Usb,
        InterfaceKind::Network,
        InterfaceKind::Driver,
        InterfaceKind::RfidUsb,
        InterfaceKind::RfidNetwork,
    ];

    /// Numeric code used by LSF files.
    pub fn code(self) -> u32 {
        match self {
            InterfaceKind::Usb => 0,
            InterfaceKind::Network => 1,
            InterfaceKind::Driver => 2,
            InterfaceKind::RfidUsb => 3,
            InterfaceKind::RfidNetwork => 4,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.code() == code)
    }

    /// Canonical name used in wire payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            InterfaceKind::Usb => "USB",
            InterfaceKind::Network => "NET",
            InterfaceKind::Driver => "DRIVER",
            InterfaceKind::RfidUsb => "RFID_USB",
            InterfaceKind::RfidNetwork => "RFID_NET",
        }
    }

    /// Parse a wire interface name, ignoring case and surrounding whitespace.
    ///
    /// Accepts the canonical names plus `NETWORK` and `RFID_NETWORK`.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "USB" => Some(InterfaceKind::Usb),
            "NET" | "NETWORK" => Some(InterfaceKind::Network),
            "DRIVER" => Some(InterfaceKind::Driver),
            "RFID_USB" => Some(InterfaceKind::RfidUsb),
            "RFID_NET" | "RFID_NETWORK" => Some(InterfaceKind::RfidNetwork),
            _ => None,
        }
    }

    /// `true` for the two RFID-capable interfaces.
    pub fn is_rfid(self) -> bool {
        matches!(self, InterfaceKind::RfidUsb | InterfaceKind::RfidNetwork)
    }

    /// `true` when the printer is addressed by IP.
    pub fn is_network(self) -> bool {
        matches!(self, InterfaceKind::Network | InterfaceKind::RfidNetwork)
    }
}

impl std::fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ── Printer ─────────────────────────────────────────────────────────────

/// Printer connection and print-quality settings.
///
/// Build one with [`PrinterConfig::builder`]; the fields stay public for
/// reading, and [`validate`](Self::validate) re-checks a value that was
/// modified after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PrinterConfig {
    /// How the printer is reached.
    pub interface: InterfaceKind,
    /// Print head resolution (100–1200).
    pub dpi: u32,
    /// Print speed (1–16).
    pub speed: u32,
    /// Print darkness (0–30).
    pub darkness: u32,
    /// IP address for network interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Device serial for USB interfaces; absent selects the first device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// Installed driver name for the driver interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    /// Gap/black-mark detection.
    pub has_gap: bool,
}

impl Default for PrinterConfig {
    /// USB, first device, 300 DPI, speed 4, darkness 10, gap detection on.
    fn default() -> Self {
        Self {
            interface: InterfaceKind::Usb,
            dpi: defaults::DPI,
            speed: defaults::SPEED,
            darkness: defaults::DARKNESS,
            address: None,
            serial: None,
            driver_name: None,
            has_gap: defaults::HAS_GAP,
        }
    }
}

impl PrinterConfig {
    /// Start building a config for the given interface with default settings.
    pub fn builder(interface: InterfaceKind) -> PrinterConfigBuilder {
        PrinterConfigBuilder {
            config: PrinterConfig {
                interface,
                ..PrinterConfig::default()
            },
        }
    }

    /// Check ranges and the identifier the interface kind requires.
    pub fn validate(&self) -> Result<(), ValidationError> {
        within("dpi", self.dpi, 100, 1200)?;
        within("speed", self.speed, 1, 16)?;
        within("darkness", self.darkness, 0, 30)?;
        if self.interface.is_network() && is_blank(self.address.as_deref()) {
            return Err(ValidationError::MissingIdentifier {
                interface: self.interface,
                field: "address",
            });
        }
        if self.interface == InterfaceKind::Driver && is_blank(self.driver_name.as_deref()) {
            return Err(ValidationError::MissingIdentifier {
                interface: self.interface,
                field: "driver_name",
            });
        }
        Ok(())
    }

    /// The identifier that selects the device, if any.
    pub fn target(&self) -> Option<&str> {
        match self.interface {
            InterfaceKind::Network | InterfaceKind::RfidNetwork => self.address.as_deref(),
            InterfaceKind::Driver => self.driver_name.as_deref(),
            InterfaceKind::Usb | InterfaceKind::RfidUsb => self.serial.as_deref(),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Builder for [`PrinterConfig`]. Empty identifier strings count as absent.
#[derive(Debug, Clone)]
pub struct PrinterConfigBuilder {
    config: PrinterConfig,
}

impl PrinterConfigBuilder {
    /// Print head resolution.
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    /// Print speed.
    pub fn speed(mut self, speed: u32) -> Self {
        self.config.speed = speed;
        self
    }

    /// Print darkness.
    pub fn darkness(mut self, darkness: u32) -> Self {
        self.config.darkness = darkness;
        self
    }

    /// Network address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.config.address = non_empty(address.into());
        self
    }

    /// USB device serial.
    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.config.serial = non_empty(serial.into());
        self
    }

    /// Installed driver name.
    pub fn driver_name(mut self, name: impl Into<String>) -> Self {
        self.config.driver_name = non_empty(name.into());
        self
    }

    /// Gap/black-mark detection.
    pub fn has_gap(mut self, has_gap: bool) -> Self {
        self.config.has_gap = has_gap;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<PrinterConfig, ValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Label ───────────────────────────────────────────────────────────────

/// Label stock geometry in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct LabelConfig {
    /// Label width.
    pub width_mm: f64,
    /// Label height.
    pub height_mm: f64,
    /// Gap between consecutive labels.
    pub gap_mm: f64,
}

impl Default for LabelConfig {
    /// 60 × 40 mm with a 2 mm gap.
    fn default() -> Self {
        Self {
            width_mm: defaults::LABEL_WIDTH_MM,
            height_mm: defaults::LABEL_HEIGHT_MM,
            gap_mm: defaults::LABEL_GAP_MM,
        }
    }
}

impl LabelConfig {
    /// Create a label config; every dimension must be finite and positive.
    pub fn new(width_mm: f64, height_mm: f64, gap_mm: f64) -> Result<Self, ValidationError> {
        let config = Self {
            width_mm,
            height_mm,
            gap_mm,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-check the dimensions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("label width", self.width_mm)?;
        positive("label height", self.height_mm)?;
        positive("label gap", self.gap_mm)
    }
}
