#![allow(dead_code)]

use std::collections::VecDeque;

use zmlabel_core::{
    BarcodeElement, BarcodeKind, InterfaceKind, LabelConfig, LabelElement, PrinterConfig,
    RfidDataType, RfidElement, RfidEncoder, TextElement,
};
use zmlabel_print_client::{
    DeviceStatus, DriverError, LabelDriver, PreviewImage, PrintJob, TagReadRequest,
};

pub fn shipping_label() -> (PrinterConfig, LabelConfig, Vec<LabelElement>) {
    let elements = vec![
        TextElement::new("title", "Shipping").at(2.0, 2.0).build().unwrap(),
        BarcodeElement::new("code", BarcodeKind::Code128Auto, "ABC-123")
            .at(2.0, 10.0)
            .build()
            .unwrap(),
    ];
    (PrinterConfig::default(), LabelConfig::default(), elements)
}

pub fn rfid_printer() -> PrinterConfig {
    PrinterConfig::builder(InterfaceKind::RfidUsb).build().unwrap()
}

pub fn uhf_hex(name: &str, data: &str) -> LabelElement {
    RfidElement::new(name, RfidEncoder::Uhf, data)
        .data_type(RfidDataType::Hex)
        .build()
        .unwrap()
}

/// Result of one scripted driver call.
#[derive(Debug, Clone)]
pub enum Step {
    Ok,
    Unavailable,
    Failed(i32),
}

/// Driver that answers every call from one shared script, then succeeds.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    pub script: VecDeque<Step>,
    pub calls: usize,
}

impl ScriptedDriver {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: steps.into_iter().collect(),
            calls: 0,
        }
    }

    fn step(&mut self) -> Result<(), DriverError> {
        self.calls += 1;
        match self.script.pop_front().unwrap_or(Step::Ok) {
            Step::Ok => Ok(()),
            Step::Unavailable => Err(DriverError::unavailable("device busy")),
            Step::Failed(code) => Err(DriverError::failed(code, "scripted failure")),
        }
    }
}

impl LabelDriver for ScriptedDriver {
    fn render_preview(&mut self, _job: &PrintJob<'_>) -> Result<PreviewImage, DriverError> {
        self.step()?;
        Ok(PreviewImage {
            width_px: 1,
            height_px: 1,
            data: vec![0],
        })
    }

    fn dispatch_print(&mut self, _job: &PrintJob<'_>, copies: u32) -> Result<u32, DriverError> {
        self.step().map(|()| copies)
    }

    fn query_status(&mut self, _printer: &PrinterConfig) -> Result<DeviceStatus, DriverError> {
        self.step()?;
        Ok(DeviceStatus::new(0, "ready"))
    }

    fn read_rfid_tag(
        &mut self,
        _printer: &PrinterConfig,
        _label: &LabelConfig,
        _request: &TagReadRequest,
    ) -> Result<String, DriverError> {
        self.step()?;
        Ok("E2801160".to_string())
    }

    fn list_connected_devices(&mut self, _interface: InterfaceKind) -> Result<Vec<String>, DriverError> {
        self.step()?;
        Ok(vec!["SCRIPTED".to_string()])
    }
}
