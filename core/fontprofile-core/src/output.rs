/// Putting the finished profile into words
///
/// A profile is only as good as the document a device receives, so this is
/// where the assembled fonts get their formal attire: an XML prolog, the
/// plist DOCTYPE, and tidy nested dicts with every string carefully escaped.
/// Alongside it lives the short JSON report for anyone who prefers to read
/// what happened rather than open the profile itself.
///
/// Made with love at FontLab https://www.fontlab.com/
use std::io::{self, Write};

use crate::encoding::encode_wrapped;
use crate::escape::escape_xml;
use crate::profile::{
    ContentBlock, ProfileDocument, ProfileSummary, CONFIGURATION_PAYLOAD_TYPE, FONT_PAYLOAD_TYPE,
    PAYLOAD_VERSION,
};

const PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
"#;

/// Serializes the document as an Apple XML property list.
///
/// Keys inside each font dict follow the order devices have always seen:
/// `Font`, `Name`, `PayloadIdentifier`, `PayloadType`, `PayloadVersion`,
/// `PayloadUUID`. The top-level dict is alphabetical.
pub fn write_plist(doc: &ProfileDocument, w: impl Write) -> io::Result<()> {
    let mut out = PlistWriter { w, depth: 0 };

    out.w.write_all(PROLOG.as_bytes())?;
    out.open("dict")?;

    out.key("PayloadContent")?;
    out.open("array")?;
    for block in &doc.content {
        write_block(&mut out, block)?;
    }
    out.close("array")?;

    out.string_entry("PayloadDescription", &doc.description)?;
    out.string_entry("PayloadDisplayName", &doc.display_name)?;
    out.string_entry("PayloadIdentifier", &doc.identifier)?;
    out.string_entry("PayloadOrganization", &doc.organization)?;
    out.string_entry("PayloadType", CONFIGURATION_PAYLOAD_TYPE)?;
    if let Some(uuid) = &doc.uuid {
        out.string_entry("PayloadUUID", uuid)?;
    }
    out.integer_entry("PayloadVersion", PAYLOAD_VERSION)?;

    out.close("dict")?;
    out.w.write_all(b"</plist>\n")?;
    out.w.flush()
}

/// Renders the whole document into memory.
pub fn render_plist(doc: &ProfileDocument) -> Vec<u8> {
    let mut buf = Vec::new();
    write_plist(doc, &mut buf).expect("writing to a Vec cannot fail");
    buf
}

/// Tells the story of a written profile as prettified JSON.
pub fn write_summary_json(summary: &ProfileSummary, mut w: impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")
}

fn write_block<W: Write>(out: &mut PlistWriter<W>, block: &ContentBlock) -> io::Result<()> {
    out.open("dict")?;
    out.key("Font")?;
    out.data(&block.data)?;
    out.string_entry("Name", &block.name)?;
    out.string_entry("PayloadIdentifier", &block.identifier)?;
    out.string_entry("PayloadType", FONT_PAYLOAD_TYPE)?;
    out.integer_entry("PayloadVersion", PAYLOAD_VERSION)?;
    if let Some(uuid) = &block.uuid {
        out.string_entry("PayloadUUID", uuid)?;
    }
    out.close("dict")
}

struct PlistWriter<W> {
    w: W,
    depth: usize,
}

impl<W: Write> PlistWriter<W> {
    fn indent(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            self.w.write_all(b"\t")?;
        }
        Ok(())
    }

    fn open(&mut self, tag: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.w, "<{tag}>")?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, tag: &str) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.indent()?;
        writeln!(self.w, "</{tag}>")
    }

    fn key(&mut self, key: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.w, "<key>{}</key>", escape_xml(key))
    }

    fn string_entry(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.key(key)?;
        self.indent()?;
        writeln!(self.w, "<string>{}</string>", escape_xml(value))
    }

    fn integer_entry(&mut self, key: &str, value: u32) -> io::Result<()> {
        self.key(key)?;
        self.indent()?;
        writeln!(self.w, "<integer>{value}</integer>")
    }

    fn data(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.indent()?;
        writeln!(self.w, "<data>")?;
        for line in encode_wrapped(bytes).lines() {
            self.indent()?;
            writeln!(self.w, "{line}")?;
        }
        self.indent()?;
        writeln!(self.w, "</data>")
    }
}
