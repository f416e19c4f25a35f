//! Fixed vocabularies for the randomly chosen StockItem fields.
//!
//! Every list is closed: generated records only ever carry values from here,
//! which is what the membership checks in the tests rely on.

/// Product names for `label`
pub const LABELS: &[&str] = &[
    "Wireless Mouse",
    "Gaming Keyboard",
    "Bluetooth Headphones",
    "USB-C Hub",
    "Mechanical Keyboard",
    "Webcam",
    "Monitor Stand",
    "Laptop Stand",
    "Mouse Pad",
    "External Hard Drive",
    "Gaming Chair",
    "Portable SSD",
    "Smartphone Stand",
    "USB Flash Drive",
    "HDMI Cable",
    "Docking Station",
    "Wireless Charger",
    "Webcam Cover",
    "Noise Cancelling Headphones",
    "Smartwatch",
    "Fitness Tracker",
];

/// Storage locations for `stockroom`
pub const STOCKROOMS: &[&str] = &[
    "Main Warehouse",
    "Secondary Warehouse",
    "Tech Storage",
    "Accessories Shelf",
    "Electronics Corner",
    "Outlet Store",
    "Returns Processing",
    "Bulk Storage",
    "Display Area",
    "Online Fulfillment Center",
];

/// Category names for `type`
pub const TYPES: &[&str] = &[
    "Electronics",
    "Accessories",
    "Peripherals",
    "Furniture",
    "Wearables",
    "Networking",
];

/// Supplier names for `supplier`
pub const SUPPLIERS: &[&str] = &[
    "Tech Supplies Inc.",
    "Gamer Gear Ltd.",
    "Office Essentials Co.",
    "Gadget World",
    "Electro Depot",
    "Smart Tech Solutions",
    "Digital Universe",
    "Innovative Gadgets",
    "High-Tech Supplies",
    "Future Electronics",
    "Value Tech Products",
];

/// Returns the vocabulary backing a field, if the field is drawn from one.
pub fn for_field(field: &str) -> Option<&'static [&'static str]> {
    match field {
        "label" => Some(LABELS),
        "stockroom" => Some(STOCKROOMS),
        "type" => Some(TYPES),
        "supplier" => Some(SUPPLIERS),
        _ => None,
    }
}
