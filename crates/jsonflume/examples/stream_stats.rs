//! Summarizes a JSON document while it arrives in small, irregular chunks,
//! the way a network feed or an LLM response delivers partial tokens.
//!
//! A visitor tallies depth and member counts as events fire, so statistics
//! are available for every prefix of the document; nothing is buffered and
//! no tree is ever built. At the end the same document is re-emitted in
//! compact form through a [`StreamingWriter`] draining into a closure sink.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonflume --example stream_stats
//! ```

use jsonflume::{FormatOptions, ParserOptions, StreamingParser, StreamingWriter, Visitor};

#[derive(Default)]
struct Stats {
    depth: usize,
    max_depth: usize,
    members: usize,
    scalars: usize,
}

impl Visitor for Stats {
    fn start_object(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn end_object(&mut self) {
        self.depth -= 1;
    }

    fn start_array(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn end_array(&mut self) {
        self.depth -= 1;
    }

    fn start_object_member(&mut self, _key: &str) {
        self.members += 1;
    }

    fn string(&mut self, _value: &str) {
        self.scalars += 1;
    }

    fn number(&mut self, _text: &str) {
        self.scalars += 1;
    }

    fn boolean(&mut self, _value: bool) {
        self.scalars += 1;
    }

    fn null(&mut self) {
        self.scalars += 1;
    }
}

fn main() {
    // In real life these chunks would come off a socket.
    let simulated_stream = [
        r#"{"sensor": "rooft"#,
        r#"op-3", "readings": [2"#,
        r#"1.5, 22.0, nan, 19"#,
        r#".75], "ok": true}"#,
    ];

    let mut parser = StreamingParser::new(ParserOptions::default());
    let mut stats = Stats::default();

    let last = simulated_stream.len() - 1;
    for (i, chunk) in simulated_stream.iter().enumerate() {
        parser.parse(chunk, i == last, &mut stats).expect("valid input");
        println!(
            "after chunk {i}: {} members, {} scalars, depth {} (max {})",
            stats.members, stats.scalars, stats.depth, stats.max_depth
        );
    }

    // Re-emit the document compactly, streaming straight to stdout.
    let mut writer = StreamingWriter::with_sink_and_options(
        |text: &str| print!("{text}"),
        FormatOptions {
            pretty: false,
            ..Default::default()
        },
    );
    writer.start_obj();
    writer.add_obj_key("sensor");
    writer.add_string("rooftop-3");
    writer.add_obj_key("readings");
    {
        let mut arr = writer.array_context(true);
        arr.add_f64(21.5);
        arr.add_f64(22.0);
        arr.add_f64(f64::NAN);
        arr.add_f64(19.75);
    }
    writer.add_obj_key("ok");
    writer.add_bool(true);
    writer.end_obj();
    println!();
}
