/**
 * SDP Codec Constraint Transform
 *
 * Relayed WebRTC offers and answers pass through this rewrite so that
 * Opus becomes the preferred audio codec with low-bandwidth parameters:
 * 16 kbps average bitrate, mono, constant bitrate, in-band FEC. Class
 * audio is mostly one teacher talking, and the constrained encoding
 * keeps it intelligible on weak connections.
 *
 * The transform is pure text surgery over the SDP body:
 *
 * 1. Find the Opus payload type from its `a=rtpmap:<pt> opus/48000/2`
 * 2. Move that payload type to the front of the `m=audio` codec list
 * 3. Replace the existing `a=fmtp:<pt>` line, or insert one right
 *    after the Opus rtpmap
 *
 * Descriptions without an Opus rtpmap pass through byte-for-byte. The
 * input's line discipline (CRLF vs LF) is preserved.
 */

/// Opus encoder parameters forced onto relayed descriptions
const OPUS_FMTP_PARAMS: &str =
    "minptime=10;useinbandfec=1;maxaveragebitrate=16000;stereo=0;sprop-stereo=0;cbr=1";

/// Rewrite an SDP body so Opus is preferred and constrained
///
/// Returns the input unchanged when no `opus/48000/2` rtpmap is
/// present. Never panics, whatever the input looks like; lines the
/// transform does not understand are copied through untouched.
pub fn constrain_opus_audio(sdp: &str) -> String {
    let Some(payload_type) = find_opus_payload(sdp) else {
        return sdp.to_string();
    };

    let newline = if sdp.contains("\r\n") { "\r\n" } else { "\n" };
    let trailing_newline = sdp.ends_with('\n');
    let has_fmtp = sdp.lines().any(|line| is_opus_fmtp(line, payload_type));

    let mut out: Vec<String> = Vec::new();
    let mut audio_rewritten = false;

    for line in sdp.lines() {
        if !audio_rewritten && line.starts_with("m=audio ") {
            out.push(prioritize_payload(line, payload_type));
            audio_rewritten = true;
        } else if has_fmtp && is_opus_fmtp(line, payload_type) {
            out.push(format!("a=fmtp:{payload_type} {OPUS_FMTP_PARAMS}"));
        } else {
            out.push(line.to_string());
            if !has_fmtp && is_opus_rtpmap(line, payload_type) {
                out.push(format!("a=fmtp:{payload_type} {OPUS_FMTP_PARAMS}"));
            }
        }
    }

    let mut result = out.join(newline);
    if trailing_newline {
        result.push_str(newline);
    }
    result
}

/// Payload type from the first `a=rtpmap:<pt> opus/48000/2` line
fn find_opus_payload(sdp: &str) -> Option<&str> {
    sdp.lines().find_map(|line| {
        let rest = line.strip_prefix("a=rtpmap:")?;
        let (payload_type, codec) = rest.split_once(' ')?;
        if !payload_type.is_empty()
            && payload_type.bytes().all(|b| b.is_ascii_digit())
            && codec.trim() == "opus/48000/2"
        {
            Some(payload_type)
        } else {
            None
        }
    })
}

fn is_opus_rtpmap(line: &str, payload_type: &str) -> bool {
    line.strip_prefix("a=rtpmap:")
        .and_then(|rest| rest.split_once(' '))
        .is_some_and(|(pt, codec)| pt == payload_type && codec.trim() == "opus/48000/2")
}

/// Exact-payload fmtp match; `a=fmtp:11` must not catch `a=fmtp:111`
fn is_opus_fmtp(line: &str, payload_type: &str) -> bool {
    match line.strip_prefix("a=fmtp:") {
        Some(rest) => match rest.strip_prefix(payload_type) {
            Some(after) => after.is_empty() || after.starts_with(' '),
            None => false,
        },
        None => false,
    }
}

/// Move the Opus payload type to the front of an `m=audio` line
///
/// The first three tokens (`m=audio <port> <proto>`) stay put; the
/// payload list is reordered with Opus first and everything else in
/// its original order.
fn prioritize_payload(line: &str, payload_type: &str) -> String {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return line.to_string();
    }

    let mut rebuilt: Vec<&str> = tokens[..3].to_vec();
    rebuilt.push(payload_type);
    rebuilt.extend(tokens[3..].iter().filter(|&&t| t != payload_type));
    rebuilt.join(" ")
}
