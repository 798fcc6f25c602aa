//! The streaming JSON writer implementation.
//!
//! [`StreamingWriter`] serializes an ordered sequence of add-value and
//! start/end-container calls into a [`Sink`], incrementally: text is emitted
//! as soon as each call is made, so a partially written document can be
//! flushed or inspected at any point.
//!
//! Unlike the parser, the writer trusts its caller: mismatched start/end
//! calls and keys added outside an object are programming errors and panic.

use alloc::string::{String, ToString};
use core::ops::{Deref, DerefMut};

use crate::serialize;

/// Output destination for a [`StreamingWriter`].
///
/// Implemented for `String` (append to an owned buffer) and for any
/// `FnMut(&str)` closure, whose captured state plays the role of the
/// traditional user-data pointer of callback-style serializers.
pub trait Sink {
    /// Appends a fragment of serialized text.
    fn append(&mut self, text: &str);
}

impl Sink for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl<F: FnMut(&str)> Sink for F {
    fn append(&mut self, text: &str) {
        self(text);
    }
}

/// Immutable formatting configuration for a [`StreamingWriter`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatOptions {
    /// Insert whitespace: indentation (or spaces when `newline` is off) and
    /// a space after key colons. Off means fully compact output.
    ///
    /// # Default
    ///
    /// `true`
    pub pretty: bool,

    /// Emit one element per line, indented two spaces per level. When off
    /// (and `pretty` is on), elements are separated by single spaces
    /// instead: `{ "foo": "bar" }`.
    ///
    /// # Default
    ///
    /// `true`
    pub newline: bool,

    /// Default number of significant digits for `f32` values.
    ///
    /// # Default
    ///
    /// 9
    pub float_precision: usize,

    /// Default number of significant digits for `f64` values. The default
    /// of 17 is round-trip safe.
    ///
    /// # Default
    ///
    /// 17
    pub double_precision: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            newline: true,
            float_precision: 9,
            double_precision: 17,
        }
    }
}

/// One open container. `has_child` controls comma placement.
#[derive(Debug, Clone, Copy)]
enum ContainerFrame {
    Object { has_child: bool, key_pending: bool },
    Array { has_child: bool, single_line: bool },
}

/// The streaming JSON writer.
///
/// Values and container boundaries are pushed in document order; the writer
/// maintains a stack of open containers and emits separators, indentation
/// and escaping as configured by [`FormatOptions`].
///
/// # Examples
///
/// ```rust
/// use jsonflume::{FormatOptions, StreamingWriter};
///
/// let mut writer = StreamingWriter::with_options(FormatOptions {
///     pretty: false,
///     ..Default::default()
/// });
/// writer.start_obj();
/// writer.add_obj_key("foo");
/// writer.add_string("bar");
/// writer.end_obj();
/// assert_eq!(writer.as_str(), r#"{"foo":"bar"}"#);
/// ```
#[derive(Debug)]
pub struct StreamingWriter<S: Sink = String> {
    sink: S,
    options: FormatOptions,
    frames: alloc::vec::Vec<ContainerFrame>,
}

impl Default for StreamingWriter<String> {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingWriter<String> {
    /// Creates a writer accumulating into an owned buffer, with default
    /// formatting.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Creates a buffer-backed writer with explicit formatting options.
    #[must_use]
    pub fn with_options(options: FormatOptions) -> Self {
        Self::with_sink_and_options(String::new(), options)
    }

    /// The text serialized so far. Valid at any point, even mid-document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.sink
    }

    /// Consumes the writer and returns the serialized text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.sink
    }
}

impl<S: Sink> StreamingWriter<S> {
    /// Creates a writer bound to a caller-supplied sink, with default
    /// formatting. The sink receives every fragment as it is produced.
    pub fn with_sink(sink: S) -> Self {
        Self::with_sink_and_options(sink, FormatOptions::default())
    }

    /// Creates a writer bound to a caller-supplied sink with explicit
    /// formatting options.
    pub fn with_sink_and_options(sink: S, options: FormatOptions) -> Self {
        Self {
            sink,
            options,
            frames: alloc::vec::Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    fn append_indent(&mut self, levels: usize) {
        for _ in 0..levels {
            self.sink.append("  ");
        }
    }

    /// Emits the separator that precedes a new child (key or array element)
    /// of the innermost container, and marks that container non-empty.
    fn begin_child(&mut self) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        let (has_child, single_line) = match frame {
            ContainerFrame::Object { has_child, .. } => {
                let had = *has_child;
                *has_child = true;
                (had, false)
            }
            ContainerFrame::Array {
                has_child,
                single_line,
            } => {
                let had = *has_child;
                *has_child = true;
                (had, *single_line)
            }
        };

        if has_child {
            self.sink.append(",");
        }
        if self.options.pretty {
            if single_line {
                if has_child {
                    self.sink.append(" ");
                }
            } else if self.options.newline {
                self.sink.append("\n");
                self.append_indent(self.frames.len());
            } else {
                self.sink.append(" ");
            }
        }
    }

    /// Separator before a closing bracket of a non-empty container.
    fn end_container_layout(&mut self, single_line: bool) {
        if self.options.pretty && !single_line {
            if self.options.newline {
                self.sink.append("\n");
                self.append_indent(self.frames.len());
            } else {
                self.sink.append(" ");
            }
        }
    }

    /// Positions the writer for a value: consumes the pending key inside an
    /// object, or emits the element separator inside an array.
    fn prepare_value(&mut self) {
        match self.frames.last_mut() {
            Some(ContainerFrame::Object { key_pending, .. }) => {
                assert!(
                    *key_pending,
                    "value added in object context without a preceding add_obj_key"
                );
                *key_pending = false;
            }
            Some(ContainerFrame::Array { .. }) => self.begin_child(),
            None => {}
        }
    }

    // ------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------

    /// Opens an object.
    pub fn start_obj(&mut self) {
        self.prepare_value();
        self.sink.append("{");
        self.frames.push(ContainerFrame::Object {
            has_child: false,
            key_pending: false,
        });
    }

    /// Closes the innermost object.
    ///
    /// # Panics
    ///
    /// Panics if the innermost open container is not an object, or a key is
    /// still awaiting its value.
    pub fn end_obj(&mut self) {
        match self.frames.pop() {
            Some(ContainerFrame::Object {
                has_child,
                key_pending,
            }) => {
                assert!(!key_pending, "end_obj after add_obj_key without a value");
                if has_child {
                    self.end_container_layout(false);
                }
                self.sink.append("}");
            }
            _ => panic!("end_obj without a matching start_obj"),
        }
    }

    /// Opens an array.
    pub fn start_array(&mut self) {
        self.start_array_impl(false);
    }

    fn start_array_impl(&mut self, single_line: bool) {
        self.prepare_value();
        self.sink.append("[");
        self.frames.push(ContainerFrame::Array {
            has_child: false,
            single_line,
        });
    }

    /// Closes the innermost array.
    ///
    /// # Panics
    ///
    /// Panics if the innermost open container is not an array.
    pub fn end_array(&mut self) {
        match self.frames.pop() {
            Some(ContainerFrame::Array {
                has_child,
                single_line,
            }) => {
                if has_child {
                    self.end_container_layout(single_line);
                }
                self.sink.append("]");
            }
            _ => panic!("end_array without a matching start_array"),
        }
    }

    /// Writes a member key. The member's value must be added next.
    ///
    /// # Panics
    ///
    /// Panics outside an object, or if the previous key has no value yet.
    pub fn add_obj_key(&mut self, key: &str) {
        match self.frames.last() {
            Some(ContainerFrame::Object { key_pending, .. }) => {
                assert!(!key_pending, "add_obj_key while a key is already pending");
            }
            _ => panic!("add_obj_key outside of an object"),
        }
        self.begin_child();
        if let Some(ContainerFrame::Object { key_pending, .. }) = self.frames.last_mut() {
            *key_pending = true;
        }
        let quoted = serialize::quote(key);
        self.sink.append(&quoted);
        self.sink
            .append(if self.options.pretty { ": " } else { ":" });
    }

    // ------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------

    /// Adds a string value.
    pub fn add_string(&mut self, value: &str) {
        self.prepare_value();
        let quoted = serialize::quote(value);
        self.sink.append(&quoted);
    }

    /// Adds a boolean value.
    pub fn add_bool(&mut self, value: bool) {
        self.prepare_value();
        self.sink.append(if value { "true" } else { "false" });
    }

    /// Adds a `null`.
    pub fn add_null(&mut self) {
        self.prepare_value();
        self.sink.append("null");
    }

    /// Adds a signed 32-bit integer.
    pub fn add_i32(&mut self, value: i32) {
        self.add_i64(i64::from(value));
    }

    /// Adds an unsigned 32-bit integer.
    pub fn add_u32(&mut self, value: u32) {
        self.add_u64(u64::from(value));
    }

    /// Adds a signed 64-bit integer.
    pub fn add_i64(&mut self, value: i64) {
        self.prepare_value();
        let text = value.to_string();
        self.sink.append(&text);
    }

    /// Adds an unsigned 64-bit integer.
    pub fn add_u64(&mut self, value: u64) {
        self.prepare_value();
        let text = value.to_string();
        self.sink.append(&text);
    }

    /// Adds a single-precision float at the default precision
    /// ([`FormatOptions::float_precision`]).
    pub fn add_f32(&mut self, value: f32) {
        self.add_f32_with_precision(value, self.options.float_precision);
    }

    /// Adds a single-precision float with an explicit number of significant
    /// digits.
    pub fn add_f32_with_precision(&mut self, value: f32, digits: usize) {
        self.add_f64_with_precision(f64::from(value), digits);
    }

    /// Adds a double-precision float at the default precision
    /// ([`FormatOptions::double_precision`]).
    pub fn add_f64(&mut self, value: f64) {
        self.add_f64_with_precision(value, self.options.double_precision);
    }

    /// Adds a double-precision float with an explicit number of significant
    /// digits.
    ///
    /// Not-a-number and the infinities are not valid JSON; they are emitted
    /// as the quoted strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
    pub fn add_f64_with_precision(&mut self, value: f64, digits: usize) {
        self.prepare_value();
        if value.is_nan() {
            self.sink.append("\"NaN\"");
        } else if value.is_infinite() {
            self.sink.append(if value > 0.0 {
                "\"Infinity\""
            } else {
                "\"-Infinity\""
            });
        } else {
            let text = serialize::format_significant(value, digits);
            self.sink.append(&text);
        }
    }

    // ------------------------------------------------------------------
    // Scoped container contexts
    // ------------------------------------------------------------------

    /// Opens an object and returns a guard that closes it on drop, on every
    /// exit path including unwinding.
    pub fn object_context(&mut self) -> ObjectContext<'_, S> {
        self.start_obj();
        ObjectContext { writer: self }
    }

    /// Opens an array and returns a guard that closes it on drop. With
    /// `single_line`, the array's elements are laid out as `[v1, v2]`
    /// regardless of the ambient mode.
    pub fn array_context(&mut self, single_line: bool) -> ArrayContext<'_, S> {
        self.start_array_impl(single_line);
        ArrayContext { writer: self }
    }
}

/// Guard returned by [`StreamingWriter::object_context`]; ends the object
/// when dropped. Dereferences to the writer so members can be added through
/// it.
#[derive(Debug)]
pub struct ObjectContext<'a, S: Sink> {
    writer: &'a mut StreamingWriter<S>,
}

impl<S: Sink> Drop for ObjectContext<'_, S> {
    fn drop(&mut self) {
        self.writer.end_obj();
    }
}

impl<S: Sink> Deref for ObjectContext<'_, S> {
    type Target = StreamingWriter<S>;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl<S: Sink> DerefMut for ObjectContext<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

/// Guard returned by [`StreamingWriter::array_context`]; ends the array when
/// dropped.
#[derive(Debug)]
pub struct ArrayContext<'a, S: Sink> {
    writer: &'a mut StreamingWriter<S>,
}

impl<S: Sink> Drop for ArrayContext<'_, S> {
    fn drop(&mut self) {
        self.writer.end_array();
    }
}

impl<S: Sink> Deref for ArrayContext<'_, S> {
    type Target = StreamingWriter<S>;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl<S: Sink> DerefMut for ArrayContext<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}
