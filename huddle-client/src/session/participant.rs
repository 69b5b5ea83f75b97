use crate::call::CallHandle;
use crate::media::MediaStream;

/// What this client knows about one participant, itself included.
#[derive(Debug, Clone)]
pub struct ParticipantState {
    pub stream: Option<MediaStream>,
    pub is_mic_on: bool,
    pub is_video_on: bool,
    pub call: Option<CallHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Mic,
    Video,
}

impl ParticipantState {
    pub fn new(stream: Option<MediaStream>, is_mic_on: bool, is_video_on: bool) -> Self {
        Self {
            stream,
            is_mic_on,
            is_video_on,
            call: None,
        }
    }

    pub fn flag(&self, track: Track) -> bool {
        match track {
            Track::Mic => self.is_mic_on,
            Track::Video => self.is_video_on,
        }
    }

    pub(crate) fn flag_mut(&mut self, track: Track) -> &mut bool {
        match track {
            Track::Mic => &mut self.is_mic_on,
            Track::Video => &mut self.is_video_on,
        }
    }
}

/// Apply a remote toggle. An explicit state is set as is; a bare toggle from
/// a peer that does not send one flips the flag.
pub(crate) fn apply_toggle(flag: &mut bool, enabled: Option<bool>) {
    *flag = match enabled {
        Some(value) => value,
        None => !*flag,
    };
}
