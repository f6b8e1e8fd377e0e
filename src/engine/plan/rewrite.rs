use prost::encoding::{WireType, decode_key, decode_varint, encode_key, encode_varint};

use crate::engine::errors::QueryNodeError;

const PLAN_VECTOR_ANNS_TAG: u32 = 1;
const ANNS_QUERY_INFO_TAG: u32 = 4;
const INFO_TOPK_TAG: u32 = 1;
const INFO_SEARCH_PARAMS_TAG: u32 = 4;

/// One field of an encoded message, borrowed from the input.
struct RawField<'a> {
    tag: u32,
    wire_type: WireType,
    /// Key and value exactly as encoded.
    raw: &'a [u8],
    /// Inner bytes of a length-delimited value, empty otherwise.
    payload: &'a [u8],
}

fn invalid(detail: impl std::fmt::Display) -> QueryNodeError {
    QueryNodeError::invalid_parameter(
        "valid serialized search plan",
        format!("no unmarshalable one: {detail}"),
    )
}

fn take<'a>(cursor: &mut &'a [u8], len: usize) -> Result<&'a [u8], QueryNodeError> {
    if cursor.len() < len {
        return Err(invalid("buffer underflow"));
    }
    let (head, tail) = cursor.split_at(len);
    *cursor = tail;
    Ok(head)
}

fn split_fields(bytes: &[u8]) -> Result<Vec<RawField<'_>>, QueryNodeError> {
    let mut fields = Vec::new();
    let mut cursor = bytes;
    while !cursor.is_empty() {
        let start = bytes.len() - cursor.len();
        let (tag, wire_type) = decode_key(&mut cursor).map_err(invalid)?;
        let mut payload: &[u8] = &[];
        match wire_type {
            WireType::Varint => {
                decode_varint(&mut cursor).map_err(invalid)?;
            }
            WireType::SixtyFourBit => {
                take(&mut cursor, 8)?;
            }
            WireType::ThirtyTwoBit => {
                take(&mut cursor, 4)?;
            }
            WireType::LengthDelimited => {
                let len = decode_varint(&mut cursor).map_err(invalid)?;
                let len = usize::try_from(len).map_err(invalid)?;
                payload = take(&mut cursor, len)?;
            }
            WireType::StartGroup | WireType::EndGroup => {
                return Err(invalid(format!("unsupported group field {tag}")));
            }
        }
        let end = bytes.len() - cursor.len();
        fields.push(RawField {
            tag,
            wire_type,
            raw: &bytes[start..end],
            payload,
        });
    }
    Ok(fields)
}

fn put_message(out: &mut Vec<u8>, tag: u32, body: &[u8]) {
    encode_key(tag, WireType::LengthDelimited, out);
    encode_varint(body.len() as u64, out);
    out.extend_from_slice(body);
}

fn is_message(field: &RawField<'_>, tag: u32) -> bool {
    field.tag == tag && field.wire_type == WireType::LengthDelimited
}

/// Rewrites `topk` and `search_params` of a vector search plan.
///
/// Works on the wire encoding: every other field, including ones this crate
/// does not model, is copied through byte for byte.
pub fn rewrite_query_info(
    plan: &[u8],
    topk: i64,
    search_params: &str,
) -> Result<Vec<u8>, QueryNodeError> {
    let mut out = Vec::with_capacity(plan.len() + search_params.len());
    for field in split_fields(plan)? {
        if is_message(&field, PLAN_VECTOR_ANNS_TAG) {
            let anns = rewrite_vector_anns(field.payload, topk, search_params)?;
            put_message(&mut out, PLAN_VECTOR_ANNS_TAG, &anns);
        } else {
            out.extend_from_slice(field.raw);
        }
    }
    Ok(out)
}

fn rewrite_vector_anns(
    anns: &[u8],
    topk: i64,
    search_params: &str,
) -> Result<Vec<u8>, QueryNodeError> {
    let mut out = Vec::with_capacity(anns.len() + search_params.len());
    let mut has_query_info = false;
    for field in split_fields(anns)? {
        if is_message(&field, ANNS_QUERY_INFO_TAG) {
            has_query_info = true;
            let info = rewrite_info(field.payload, topk, search_params)?;
            put_message(&mut out, ANNS_QUERY_INFO_TAG, &info);
        } else {
            out.extend_from_slice(field.raw);
        }
    }
    if !has_query_info {
        let info = rewrite_info(&[], topk, search_params)?;
        put_message(&mut out, ANNS_QUERY_INFO_TAG, &info);
    }
    Ok(out)
}

fn rewrite_info(info: &[u8], topk: i64, search_params: &str) -> Result<Vec<u8>, QueryNodeError> {
    let mut out = Vec::with_capacity(info.len() + search_params.len());
    for field in split_fields(info)? {
        if field.tag != INFO_TOPK_TAG && field.tag != INFO_SEARCH_PARAMS_TAG {
            out.extend_from_slice(field.raw);
        }
    }
    // proto3 scalars: last occurrence wins, defaults are omitted
    if topk != 0 {
        encode_key(INFO_TOPK_TAG, WireType::Varint, &mut out);
        encode_varint(topk as u64, &mut out);
    }
    if !search_params.is_empty() {
        put_message(&mut out, INFO_SEARCH_PARAMS_TAG, search_params.as_bytes());
    }
    Ok(out)
}
