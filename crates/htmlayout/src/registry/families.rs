//! Static knowledge base: every component family the default registry knows,
//! and what kind of content each component accepts.
//!
//! Content models are declared, never inferred. A header takes its text as
//! children, a dropdown takes nothing, tabs take elements only.

use super::ContentModel;

// ── Component info ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ComponentInfo {
    /// Class name exactly as the host framework spells it.
    pub name: &'static str,
    pub content: ContentModel,
}

impl ComponentInfo {
    const fn mixed(name: &'static str) -> Self {
        Self { name, content: ContentModel::MIXED }
    }

    const fn text(name: &'static str) -> Self {
        Self { name, content: ContentModel::TEXT }
    }

    const fn elements(name: &'static str) -> Self {
        Self { name, content: ContentModel::ELEMENTS }
    }

    const fn empty(name: &'static str) -> Self {
        Self { name, content: ContentModel::EMPTY }
    }
}

// ── Family info ───────────────────────────────────────────────────────────

pub struct FamilyInfo {
    /// `None` for the plain HTML family, whose tags need no prefix.
    pub prefix: Option<&'static str>,
    pub namespace: &'static str,
    /// Constructor argument that receives the `class` attribute.
    pub class_prop: &'static str,
    pub components: &'static [ComponentInfo],
}

use ComponentInfo as C;

// ── dash.html ─────────────────────────────────────────────────────────────

const HTML: &[ComponentInfo] = &[
    C::mixed("A"), C::mixed("Abbr"), C::mixed("Acronym"), C::mixed("Address"),
    C::empty("Area"), C::mixed("Article"), C::mixed("Aside"), C::mixed("Audio"),
    C::mixed("B"), C::empty("Base"), C::empty("Basefont"), C::mixed("Bdi"),
    C::mixed("Bdo"), C::mixed("Big"), C::mixed("Blink"), C::mixed("Blockquote"),
    C::empty("Br"), C::mixed("Button"), C::mixed("Canvas"), C::mixed("Caption"),
    C::mixed("Center"), C::mixed("Cite"), C::mixed("Code"), C::empty("Col"),
    C::elements("Colgroup"), C::mixed("Content"), C::mixed("Data"), C::elements("Datalist"),
    C::mixed("Dd"), C::mixed("Del"), C::mixed("Details"), C::mixed("Dfn"),
    C::mixed("Dialog"), C::mixed("Div"), C::elements("Dl"), C::mixed("Dt"),
    C::mixed("Em"), C::empty("Embed"), C::mixed("Fieldset"), C::mixed("Figcaption"),
    C::mixed("Figure"), C::mixed("Font"), C::mixed("Footer"), C::mixed("Form"),
    C::mixed("Frame"), C::elements("Frameset"),
    C::mixed("H1"), C::mixed("H2"), C::mixed("H3"), C::mixed("H4"), C::mixed("H5"), C::mixed("H6"),
    C::mixed("Header"), C::mixed("Hgroup"), C::empty("Hr"), C::mixed("I"),
    C::mixed("Iframe"), C::empty("Img"), C::mixed("Ins"), C::mixed("Kbd"),
    C::empty("Keygen"), C::mixed("Label"), C::mixed("Legend"), C::mixed("Li"),
    C::empty("Link"), C::mixed("Main"), C::mixed("MapEl"), C::mixed("Mark"),
    C::mixed("Marquee"), C::empty("Meta"), C::mixed("Meter"), C::mixed("Nav"),
    C::mixed("Nobr"), C::mixed("Noscript"), C::mixed("ObjectEl"), C::elements("Ol"),
    C::elements("Optgroup"), C::text("Option"), C::mixed("Output"), C::mixed("P"),
    C::empty("Param"), C::mixed("Picture"), C::text("Plaintext"), C::mixed("Pre"),
    C::mixed("Progress"), C::mixed("Q"), C::mixed("Rb"), C::mixed("Rp"),
    C::mixed("Rt"), C::mixed("Rtc"), C::mixed("Ruby"), C::mixed("S"),
    C::mixed("Samp"), C::text("Script"), C::mixed("Section"), C::elements("Select"),
    C::mixed("Shadow"), C::mixed("Slot"), C::mixed("Small"), C::empty("Source"),
    C::mixed("Spacer"), C::mixed("Span"), C::mixed("Strike"), C::mixed("Strong"),
    C::mixed("Sub"), C::mixed("Summary"), C::mixed("Sup"), C::elements("Table"),
    C::elements("Tbody"), C::mixed("Td"), C::mixed("Template"), C::text("Textarea"),
    C::elements("Tfoot"), C::mixed("Th"), C::elements("Thead"), C::mixed("Time"),
    C::text("Title"), C::elements("Tr"), C::empty("Track"), C::mixed("U"),
    C::elements("Ul"), C::mixed("Var"), C::mixed("Video"), C::empty("Wbr"),
    C::text("Xmp"),
];

// ── dash.dcc ──────────────────────────────────────────────────────────────

const DCC: &[ComponentInfo] = &[
    C::empty("Checklist"),
    C::empty("Clipboard"),
    C::empty("ConfirmDialog"),
    C::mixed("ConfirmDialogProvider"),
    C::empty("DatePickerRange"),
    C::empty("DatePickerSingle"),
    C::empty("Download"),
    C::empty("Dropdown"),
    C::empty("Geolocation"),
    C::empty("Graph"),
    C::empty("Input"),
    C::empty("Interval"),
    C::mixed("Link"),
    C::mixed("Loading"),
    C::empty("Location"),
    C::empty("Logout"),
    C::text("Markdown"),
    C::empty("RadioItems"),
    C::empty("RangeSlider"),
    C::empty("Slider"),
    C::empty("Store"),
    C::mixed("Tab"),
    C::elements("Tabs"),
    C::empty("Textarea"),
    C::mixed("Tooltip"),
    C::mixed("Upload"),
];

// ── dash.dash_table ───────────────────────────────────────────────────────

const TABLE: &[ComponentInfo] = &[C::empty("DataTable")];

// ── dash_daq ──────────────────────────────────────────────────────────────

const DAQ: &[ComponentInfo] = &[
    C::empty("BooleanSwitch"),
    C::empty("ColorPicker"),
    C::elements("DarkThemeProvider"),
    C::empty("Gauge"),
    C::empty("GraduatedBar"),
    C::empty("Indicator"),
    C::empty("Joystick"),
    C::empty("Knob"),
    C::empty("LEDDisplay"),
    C::empty("NumericInput"),
    C::empty("PowerButton"),
    C::empty("PrecisionInput"),
    C::empty("Slider"),
    C::mixed("StopButton"),
    C::empty("Tank"),
    C::empty("Thermometer"),
    C::empty("ToggleSwitch"),
];

// ── dash_bio (viewers and charts that are component classes) ──────────────

const BIO: &[ComponentInfo] = &[
    C::empty("AlignmentChart"),
    C::empty("Circos"),
    C::empty("FornaContainer"),
    C::empty("Ideogram"),
    C::empty("Igv"),
    C::empty("Molecule2dViewer"),
    C::empty("Molecule3dViewer"),
    C::empty("NeedlePlot"),
    C::empty("NglMoleculeViewer"),
    C::empty("OncoPrint"),
    C::empty("Pileup"),
    C::empty("SequenceViewer"),
    C::empty("Speck"),
];

// ── dash_player ───────────────────────────────────────────────────────────

const PLAYER: &[ComponentInfo] = &[C::empty("DashPlayer")];

// ── dash_bootstrap_components ─────────────────────────────────────────────

const BOOTSTRAP: &[ComponentInfo] = &[
    C::elements("Accordion"), C::mixed("AccordionItem"), C::mixed("Alert"), C::mixed("Badge"),
    C::empty("Breadcrumb"), C::mixed("Button"), C::elements("ButtonGroup"), C::mixed("Card"),
    C::mixed("CardBody"), C::mixed("CardFooter"), C::elements("CardGroup"), C::mixed("CardHeader"),
    C::empty("CardImg"), C::mixed("CardImgOverlay"), C::mixed("CardLink"), C::empty("Carousel"),
    C::empty("Checkbox"), C::empty("Checklist"), C::mixed("Col"), C::mixed("Collapse"),
    C::mixed("Container"), C::mixed("DropdownMenu"), C::mixed("DropdownMenuItem"), C::mixed("Fade"),
    C::mixed("Form"), C::mixed("FormFeedback"), C::mixed("FormFloating"), C::mixed("FormText"),
    C::empty("Input"), C::mixed("InputGroup"), C::mixed("InputGroupText"), C::mixed("Label"),
    C::elements("ListGroup"), C::mixed("ListGroupItem"), C::mixed("Modal"), C::mixed("ModalBody"),
    C::mixed("ModalFooter"), C::mixed("ModalHeader"), C::mixed("ModalTitle"), C::mixed("Nav"),
    C::mixed("NavItem"), C::mixed("NavLink"), C::mixed("Navbar"), C::mixed("NavbarBrand"),
    C::mixed("NavbarSimple"), C::mixed("NavbarToggler"), C::mixed("Offcanvas"), C::empty("Pagination"),
    C::mixed("Placeholder"), C::mixed("Popover"), C::mixed("PopoverBody"), C::mixed("PopoverHeader"),
    C::mixed("Progress"), C::empty("RadioButton"), C::empty("RadioItems"), C::mixed("Row"),
    C::empty("Select"), C::mixed("Spinner"), C::mixed("Stack"), C::empty("Switch"),
    C::mixed("Tab"), C::mixed("Table"), C::elements("Tabs"), C::empty("Textarea"),
    C::mixed("Toast"), C::mixed("Tooltip"),
];

// ── Family registry ───────────────────────────────────────────────────────

pub static DASH_FAMILIES: &[FamilyInfo] = &[
    FamilyInfo { prefix: None,              namespace: "dash_html_components",      class_prop: "className", components: HTML },
    FamilyInfo { prefix: Some("dcc"),       namespace: "dash_core_components",      class_prop: "className", components: DCC },
    FamilyInfo { prefix: Some("table"),     namespace: "dash_table",                class_prop: "className", components: TABLE },
    FamilyInfo { prefix: Some("daq"),       namespace: "dash_daq",                  class_prop: "className", components: DAQ },
    FamilyInfo { prefix: Some("bio"),       namespace: "dash_bio",                  class_prop: "className", components: BIO },
    FamilyInfo { prefix: Some("player"),    namespace: "dash_player",               class_prop: "className", components: PLAYER },
    FamilyInfo { prefix: Some("bootstrap"), namespace: "dash_bootstrap_components", class_prop: "className", components: BOOTSTRAP },
];
