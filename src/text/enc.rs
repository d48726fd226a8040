//! # Encoding the text form.
//!
//! The encoder walks the tree recursively; the options record and the
//! container depth are threaded explicitly through every call, so
//! header fields can re-enter with overridden options without ambient
//! state.

use alloc::{format, string::String};

use crate::{
    error::{EncodeError, EncodeErrorKind},
    types::{Am, Ari, AriType, IdSeg, LitVal, Literal, Reference, Tbl},
};

use super::{FloatForm, IntBase, base16, base64, escape, float, int, percent, time};

/// The additional percent-encoding safe set of the `ari:` scheme.
const URI_SAFE: &[u8] = b"!'+:@";

/// Where the `ari:` scheme prefix is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemePrefix {
    /// Never emit the prefix.
    None,
    /// Emit the prefix only at the outermost value.
    #[default]
    First,
    /// Emit the prefix at every nested value.
    All,
}

/// How type tags are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeForm {
    /// As originally decoded, falling back to the canonical name.
    Orig,
    /// Always the canonical uppercase name.
    #[default]
    Text,
    /// Always the decimal enumeration code.
    Int,
}

/// How byte strings are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BstrForm {
    /// Quoted text when the bytes are UTF-8, hex otherwise.
    Raw,
    /// `h'…'` uppercase hex.
    #[default]
    Base16,
    /// `b64'…'` base64url.
    Base64Url,
}

/// Options controlling the text rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Where the `ari:` prefix appears.
    pub scheme_prefix: SchemePrefix,
    /// How type tags are rendered.
    pub show_ari_type: TypeForm,
    /// The integer radix.
    pub int_base: IntBase,
    /// The float form letter.
    pub float_form: FloatForm,
    /// Whether identifier-shaped text strings are left unquoted.
    pub text_identity: bool,
    /// How byte strings are rendered.
    pub bstr_form: BstrForm,
    /// Whether time values use the ISO 8601 forms rather than decimal
    /// fractions.
    pub time_text: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            scheme_prefix: SchemePrefix::default(),
            show_ari_type: TypeForm::default(),
            int_base: IntBase::default(),
            float_form: FloatForm::default(),
            text_identity: true,
            bstr_form: BstrForm::default(),
            time_text: true,
        }
    }
}

impl EncodeOptions {
    /// The same options with the scheme prefix suppressed, for header
    /// fields like `n=` and `r=`.
    fn without_scheme(&self) -> Self {
        Self {
            scheme_prefix: SchemePrefix::None,
            ..*self
        }
    }
}

/// A text form encoder accumulating output in a string.
#[derive(Default)]
pub struct Encoder {
    output: String,
}

impl Encoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the encoder, returning the accumulated text.
    #[must_use]
    pub fn output(self) -> String {
        self.output
    }

    /// Encodes one ARI at the given container depth.
    ///
    /// # Errors
    /// Fails when the tree violates a literal-type invariant or a time
    /// point cannot be put on the calendar.
    pub fn encode_ari(
        &mut self,
        ari: &Ari,
        opts: &EncodeOptions,
        depth: usize,
    ) -> Result<(), EncodeError> {
        match opts.scheme_prefix {
            SchemePrefix::None => {}
            SchemePrefix::First if depth == 0 => self.output.push_str("ari:"),
            SchemePrefix::First => {}
            SchemePrefix::All => self.output.push_str("ari:"),
        }
        match ari {
            Ari::Lit(lit) => self.encode_lit(lit, opts, depth),
            Ari::Ref(reference) => self.encode_ref(reference, opts, depth),
        }
    }

    fn encode_ref(
        &mut self,
        reference: &Reference,
        opts: &EncodeOptions,
        depth: usize,
    ) -> Result<(), EncodeError> {
        let path = &reference.path;
        self.output.push_str("//");
        self.encode_idseg(&path.ns_id);
        if path.type_id.is_null() && path.ari_type.is_none() {
            // Namespace-only reference.
            return Ok(());
        }
        self.output.push('/');
        match path.ari_type {
            Some(ari_type) => self.encode_path_type(ari_type, &path.type_id, opts),
            None => self.encode_idseg(&path.type_id),
        }
        if !path.obj_id.is_null() {
            self.output.push('/');
            self.encode_idseg(&path.obj_id);
        }
        match &reference.params {
            crate::types::RefParams::None => Ok(()),
            crate::types::RefParams::Ac(items) => self.encode_ac(items, opts, depth),
            crate::types::RefParams::Am(am) => self.encode_am(am, opts, depth),
        }
    }

    fn encode_idseg(&mut self, segment: &IdSeg) {
        match segment {
            IdSeg::Null => {}
            IdSeg::Text(text) => percent::encode(&mut self.output, text.as_bytes(), URI_SAFE),
            IdSeg::Int(value) => self.output.push_str(&format!("{value}")),
        }
    }

    /// The type position of a path, under the type-name policy.
    fn encode_path_type(&mut self, ari_type: AriType, orig: &IdSeg, opts: &EncodeOptions) {
        match opts.show_ari_type {
            TypeForm::Text => self.output.push_str(ari_type.name()),
            TypeForm::Int => self.output.push_str(&format!("{}", ari_type.code())),
            TypeForm::Orig => match orig {
                IdSeg::Null => self.output.push_str(ari_type.name()),
                _ => self.encode_idseg(orig),
            },
        }
    }

    fn encode_lit(
        &mut self,
        lit: &Literal,
        opts: &EncodeOptions,
        depth: usize,
    ) -> Result<(), EncodeError> {
        let Some(ari_type) = lit.ari_type else {
            return self.encode_prim(&lit.value, opts);
        };
        self.output.push('/');
        match opts.show_ari_type {
            // Literals carry no original spelling, so ORIG degrades to
            // the canonical name.
            TypeForm::Text | TypeForm::Orig => self.output.push_str(ari_type.name()),
            TypeForm::Int => self.output.push_str(&format!("{}", ari_type.code())),
        }
        self.output.push('/');
        match (ari_type, &lit.value) {
            (AriType::Tp, LitVal::Timespec(value)) => {
                if opts.time_text {
                    time::utctime_encode(&mut self.output, *value)
                } else {
                    time::decfrac_encode(&mut self.output, *value);
                    Ok(())
                }
            }
            (AriType::Td, LitVal::Timespec(value)) => {
                if opts.time_text {
                    time::timeperiod_encode(&mut self.output, *value);
                } else {
                    time::decfrac_encode(&mut self.output, *value);
                }
                Ok(())
            }
            (AriType::Ac, LitVal::Ac(items)) => self.encode_ac(items, opts, depth),
            (AriType::Am, LitVal::Am(am)) => self.encode_am(am, opts, depth),
            (AriType::Tbl, LitVal::Tbl(tbl)) => self.encode_tbl(tbl, opts, depth),
            (AriType::Execset, LitVal::Execset(execset)) => {
                self.output.push_str("n=");
                self.encode_ari(&execset.nonce, &opts.without_scheme(), depth + 1)?;
                self.output.push(';');
                self.output.push('(');
                for (index, target) in execset.targets.iter().enumerate() {
                    if index > 0 {
                        self.output.push(',');
                    }
                    self.encode_ari(target, opts, depth + 1)?;
                }
                self.output.push(')');
                Ok(())
            }
            (AriType::Rptset, LitVal::Rptset(rptset)) => {
                let header = opts.without_scheme();
                self.output.push_str("n=");
                self.encode_ari(&rptset.nonce, &header, depth + 1)?;
                self.output.push_str(";r=");
                self.encode_ari(&rptset.reftime, &header, depth + 1)?;
                self.output.push(';');
                for report in &rptset.reports {
                    self.output.push_str("(t=");
                    self.encode_ari(&report.reltime, &header, depth + 1)?;
                    self.output.push_str(";s=");
                    self.encode_ari(&report.source, &header, depth + 1)?;
                    self.output.push_str(";(");
                    for (index, item) in report.items.iter().enumerate() {
                        if index > 0 {
                            self.output.push(',');
                        }
                        self.encode_ari(item, opts, depth + 1)?;
                    }
                    self.output.push_str("))");
                }
                Ok(())
            }
            (ari_type, value) if value.is_container() || ari_type.is_container_type() => {
                Err(EncodeErrorKind::TypeValueMismatch { ari_type }.into())
            }
            (AriType::Tp | AriType::Td, _) => {
                Err(EncodeErrorKind::TypeValueMismatch { ari_type }.into())
            }
            (_, value) => self.encode_prim(value, opts),
        }
    }

    fn encode_ac(
        &mut self,
        items: &[Ari],
        opts: &EncodeOptions,
        depth: usize,
    ) -> Result<(), EncodeError> {
        self.output.push('(');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.output.push(',');
            }
            self.encode_ari(item, opts, depth + 1)?;
        }
        self.output.push(')');
        Ok(())
    }

    fn encode_am(
        &mut self,
        am: &Am,
        opts: &EncodeOptions,
        depth: usize,
    ) -> Result<(), EncodeError> {
        self.output.push('(');
        for (index, (key, value)) in am.iter().enumerate() {
            if index > 0 {
                self.output.push(',');
            }
            self.encode_ari(key, opts, depth + 1)?;
            self.output.push('=');
            self.encode_ari(value, opts, depth + 1)?;
        }
        self.output.push(')');
        Ok(())
    }

    fn encode_tbl(
        &mut self,
        tbl: &Tbl,
        opts: &EncodeOptions,
        depth: usize,
    ) -> Result<(), EncodeError> {
        self.output.push_str(&format!("c={};", tbl.ncols()));
        if tbl.ncols() == 0 {
            return Ok(());
        }
        for row in tbl.rows() {
            self.encode_ac(row, opts, depth)?;
        }
        Ok(())
    }

    fn encode_prim(&mut self, value: &LitVal, opts: &EncodeOptions) -> Result<(), EncodeError> {
        match value {
            LitVal::Undefined => self.output.push_str("undefined"),
            LitVal::Null => self.output.push_str("null"),
            LitVal::Bool(true) => self.output.push_str("true"),
            LitVal::Bool(false) => self.output.push_str("false"),
            LitVal::Uint64(v) => int::encode_u64(&mut self.output, *v, opts.int_base),
            LitVal::Int64(v) => int::encode_i64(&mut self.output, *v, opts.int_base),
            LitVal::Float64(v) => float::encode(&mut self.output, *v, opts.float_form),
            LitVal::Timespec(v) => time::decfrac_encode(&mut self.output, *v),
            LitVal::Tstr(text) => self.encode_tstr(text, opts),
            LitVal::Bstr(bytes) => self.encode_bstr(bytes, opts),
            _ => return Err(EncodeErrorKind::UntaggedContainer.into()),
        }
        Ok(())
    }

    fn encode_tstr(&mut self, text: &str, opts: &EncodeOptions) {
        if opts.text_identity && percent::is_identity(text.as_bytes()) {
            self.output.push_str(text);
            return;
        }
        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push('"');
        escape::escape(&mut quoted, text, '"');
        quoted.push('"');
        percent::encode(&mut self.output, quoted.as_bytes(), URI_SAFE);
    }

    fn encode_bstr(&mut self, bytes: &[u8], opts: &EncodeOptions) {
        match opts.bstr_form {
            BstrForm::Raw => match core::str::from_utf8(bytes) {
                Ok(text) => {
                    let mut quoted = String::with_capacity(text.len() + 2);
                    quoted.push('\'');
                    escape::escape(&mut quoted, text, '\'');
                    quoted.push('\'');
                    percent::encode(&mut self.output, quoted.as_bytes(), URI_SAFE);
                }
                Err(_) => {
                    self.output.push_str("h'");
                    base16::encode(&mut self.output, bytes, true);
                    self.output.push('\'');
                }
            },
            BstrForm::Base16 => {
                self.output.push_str("h'");
                base16::encode(&mut self.output, bytes, true);
                self.output.push('\'');
            }
            BstrForm::Base64Url => {
                self.output.push_str("b64'");
                base64::encode(&mut self.output, bytes, true);
                self.output.push('\'');
            }
        }
    }
}
