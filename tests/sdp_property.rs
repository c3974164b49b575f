//! Property-based tests for the SDP codec constraint transform
//!
//! Uses proptest to generate random inputs and verify the transform's
//! guarantees: total on arbitrary text, identity without Opus, and a
//! stable constrained form when Opus is present.

use proptest::prelude::*;

use classlive::signaling::constrain_opus_audio;

const TARGET_PARAMS: &str =
    "minptime=10;useinbandfec=1;maxaveragebitrate=16000;stereo=0;sprop-stereo=0;cbr=1";

fn opus_sdp(payload_type: u8, with_fmtp: bool, newline: &str) -> String {
    let mut sdp = format!(
        "v=0{nl}o=- 1 1 IN IP4 127.0.0.1{nl}s=-{nl}\
         m=audio 9 UDP/TLS/RTP/SAVPF 103 {pt}{nl}\
         a=rtpmap:103 ISAC/16000{nl}\
         a=rtpmap:{pt} opus/48000/2{nl}",
        nl = newline,
        pt = payload_type
    );
    if with_fmtp {
        sdp.push_str(&format!("a=fmtp:{} minptime=5{}", payload_type, newline));
    }
    sdp
}

proptest! {
    #[test]
    fn test_transform_is_total_on_arbitrary_text(input in "(?s).{0,400}") {
        // Must not panic, whatever the bytes look like
        let _ = constrain_opus_audio(&input);
    }

    #[test]
    fn test_without_opus_the_transform_is_identity(
        lines in proptest::collection::vec("[ -~]{0,40}", 0..12),
    ) {
        let sdp = lines.join("\r\n");
        prop_assume!(!sdp.contains("opus/48000/2"));
        prop_assert_eq!(constrain_opus_audio(&sdp), sdp);
    }

    #[test]
    fn test_opus_descriptions_come_back_constrained(
        payload_type in 104u8..=127,
        with_fmtp in any::<bool>(),
        crlf in any::<bool>(),
    ) {
        let newline = if crlf { "\r\n" } else { "\n" };
        let sdp = opus_sdp(payload_type, with_fmtp, newline);
        let out = constrain_opus_audio(&sdp);

        // Opus leads the codec list
        let expected_mline = format!("m=audio 9 UDP/TLS/RTP/SAVPF {} 103", payload_type);
        prop_assert!(out.contains(&expected_mline));

        // Exactly one fmtp line, carrying the constrained parameters
        let fmtp_prefix = format!("a=fmtp:{} ", payload_type);
        let fmtp_lines: Vec<&str> = out
            .lines()
            .filter(|line| line.starts_with(&fmtp_prefix))
            .collect();
        prop_assert_eq!(fmtp_lines.len(), 1);
        prop_assert_eq!(
            fmtp_lines[0],
            format!("a=fmtp:{} {}", payload_type, TARGET_PARAMS)
        );

        // Line discipline survives the rewrite
        if crlf {
            prop_assert!(!out.replace("\r\n", "").contains('\n'));
        } else {
            prop_assert!(!out.contains('\r'));
        }
        prop_assert_eq!(out.ends_with('\n'), sdp.ends_with('\n'));
    }

    #[test]
    fn test_transform_is_idempotent(
        payload_type in 104u8..=127,
        with_fmtp in any::<bool>(),
        crlf in any::<bool>(),
    ) {
        let newline = if crlf { "\r\n" } else { "\n" };
        let sdp = opus_sdp(payload_type, with_fmtp, newline);

        let once = constrain_opus_audio(&sdp);
        let twice = constrain_opus_audio(&once);
        prop_assert_eq!(&once, &twice);
    }
}
