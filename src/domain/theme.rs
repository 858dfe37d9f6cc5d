//! Theme elements and color validation.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::ThemeError;

/// Elements the renderer can color.
pub const THEME_ELEMENTS: &[&str] = &[
    "Adapter",
    "AdapterPowered",
    "AdapterNotPowered",
    "AdapterDiscoverable",
    "AdapterScanning",
    "AdapterPairable",
    "Device",
    "DeviceType",
    "DeviceAlias",
    "DeviceConnected",
    "DeviceDiscovered",
    "DeviceProperty",
    "DevicePropertyConnected",
    "DevicePropertyDiscovered",
    "Menu",
    "MenuBar",
    "MenuItem",
    "StatusInfo",
    "StatusError",
    "Background",
    "Border",
    "Text",
    "ProgressBar",
    "ProgressText",
];

/// Named colors accepted besides `#rrggbb`: the CSS/X11 color names plus
/// the terminal's `default` and `transparent`.
const NAMED_COLORS: &[&str] = &[
    "default", "transparent", "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure",
    "beige", "bisque", "black", "blanchedalmond", "blue", "blueviolet", "brown", "burlywood",
    "cadetblue", "chartreuse", "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson",
    "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey",
    "darkkhaki", "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred",
    "darksalmon", "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey",
    "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey",
    "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro",
    "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow", "grey", "honeydew",
    "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender", "lavenderblush",
    "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan", "lightgoldenrodyellow",
    "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon", "lightseagreen",
    "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue", "lightyellow", "lime",
    "limegreen", "linen", "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid",
    "mediumpurple", "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "navyblue", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid",
    "palegoldenrod", "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff",
    "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown",
    "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna",
    "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen",
    "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

fn hex_color() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color pattern"))
}

/// A validated color value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(String),
    Rgb(u8, u8, u8),
}

impl ThemeColor {
    /// Parse a color name (case-insensitive) or a `#rrggbb` value.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if hex_color().is_match(value) {
            let channel = |i: usize| u8::from_str_radix(&value[i..i + 2], 16).ok();
            return Some(ThemeColor::Rgb(channel(1)?, channel(3)?, channel(5)?));
        }

        let lower = value.to_ascii_lowercase();
        NAMED_COLORS
            .contains(&lower.as_str())
            .then_some(ThemeColor::Named(lower))
    }
}

/// Validated element-to-color mapping handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    colors: BTreeMap<String, ThemeColor>,
}

impl Theme {
    /// Validate a flattened theme map. Element names are case-sensitive.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, ThemeError> {
        let mut colors = BTreeMap::new();

        for (element, color) in map {
            if !THEME_ELEMENTS.contains(&element.as_str()) {
                return Err(ThemeError::UnknownElement(element.clone()));
            }

            let parsed = ThemeColor::parse(color).ok_or_else(|| ThemeError::InvalidColor {
                element: element.clone(),
                color: color.clone(),
            })?;
            colors.insert(element.clone(), parsed);
        }

        Ok(Self { colors })
    }

    pub fn color(&self, element: &str) -> Option<&ThemeColor> {
        self.colors.get(element)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Theme element listing appended to the help output.
pub fn element_help() -> String {
    let mut help = String::from("Theme elements:\n");
    for chunk in THEME_ELEMENTS.chunks(4) {
        help.push_str("  ");
        help.push_str(&chunk.join(", "));
        help.push('\n');
    }
    help.push_str(
        "\nColors: a CSS/X11 color name (e.g. red, darkorange, default) or #rrggbb.",
    );
    help
}
