#![allow(dead_code)]
// Not every test file uses every payload; hence the warning suppression

/// A clean Readable module with no x-plc tooling: shape-valid, zero errors,
/// and exactly the five completeness warnings.
pub const VALID_PAYLOAD: &str = r#"
{
    "equipment_id": "cryo_mf",
    "description": "Cryostat magnetic field SEC node",
    "firmware": "v2.1.0",
    "modules": {
        "mf": {
            "interface_classes": ["Readable"],
            "description": "Magnetic field readout",
            "implementation": "PlcSecNode.Readable",
            "accessibles": {
                "value": {
                    "description": "Current field in T",
                    "datainfo": {"type": "double", "unit": "T", "min": -15.0, "max": 15.0},
                    "readonly": true
                },
                "status": {
                    "description": "Module status",
                    "datainfo": {
                        "type": "tuple",
                        "members": [
                            {"type": "enum", "members": {"IDLE": 100, "WARN": 200, "ERROR": 400}},
                            {"type": "string"}
                        ]
                    },
                    "readonly": true
                },
                "pollinterval": {
                    "description": "Polling interval in s",
                    "datainfo": {"type": "double", "min": 0.1, "max": 120.0}
                }
            }
        }
    }
}
"#;

/// Same node, plus the legacy 'offset' accessible: business-rule errors.
pub const BLOCKING_PAYLOAD: &str = r#"
{
    "equipment_id": "cryo_mf",
    "description": "Cryostat magnetic field SEC node",
    "firmware": "v2.1.0",
    "modules": {
        "mf": {
            "interface_classes": ["Readable"],
            "description": "Magnetic field readout",
            "implementation": "PlcSecNode.Readable",
            "accessibles": {
                "value": {
                    "description": "Current field in T",
                    "datainfo": {"type": "double", "unit": "T", "min": -15.0, "max": 15.0},
                    "readonly": true
                },
                "status": {
                    "description": "Module status",
                    "datainfo": {
                        "type": "tuple",
                        "members": [
                            {"type": "enum", "members": {"IDLE": 100, "WARN": 200, "ERROR": 400}},
                            {"type": "string"}
                        ]
                    },
                    "readonly": true
                },
                "pollinterval": {
                    "description": "Polling interval in s",
                    "datainfo": {"type": "double", "min": 0.1, "max": 120.0}
                },
                "offset": {
                    "description": "Legacy offset",
                    "datainfo": {"type": "double"}
                }
            }
        }
    }
}
"#;

/// Shape-invalid: unknown top-level field.
pub const BAD_PAYLOAD: &str = r#"
{
    "equipment_id": "cryo_mf",
    "description": "Cryostat magnetic field SEC node",
    "firmware": "v2.1.0",
    "hardware": "rev B",
    "modules": {}
}
"#;
