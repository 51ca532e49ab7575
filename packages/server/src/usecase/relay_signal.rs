//! UseCase: WebRTC シグナリングの中継
//!
//! offer / answer / ice-candidate を、送信者と同じルームにいる宛先の接続へ
//! そのまま転送する。中身（SDP, ICE 候補）は解釈しない。
//!
//! 宛先が既に退出している、あるいは別のルームにいる場合は黙って破棄する。
//! 退出と転送が競合するのは通常の動作なので、送信者にエラーは返さない。

use std::sync::Arc;

use serde_json::Value;

use crate::{
    domain::{Connection, ConnectionId, MessagePusher, RoomRegistry},
    infrastructure::dto::websocket::{
        ForwardedAnswer, ForwardedIceCandidate, ForwardedOffer, ServerEvent,
    },
};

use super::{SignalingError, membership::require_participant, notify::push_event};

/// 中継するシグナリングメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum SignalPayload {
    Offer(Value),
    Answer(Value),
    IceCandidate(Value),
}

/// 中継の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    /// 宛先がルームにいない、または送信できなかった
    Dropped,
}

pub struct RelaySignalUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// # Errors
    ///
    /// 送信者がどのルームにも参加していない場合 `SignalingError::Validation`
    pub async fn execute(
        &self,
        sender: &Connection,
        to: ConnectionId,
        payload: SignalPayload,
    ) -> Result<RelayOutcome, SignalingError> {
        let room_id = sender.current_room().ok_or_else(|| {
            SignalingError::Validation("join a room before sending signaling messages".to_string())
        })?;
        let from = require_participant(self.registry.as_ref(), room_id, sender).await?;

        if self.registry.find_participant(room_id, &to).await.is_none() {
            tracing::debug!(
                "Dropping signal from {} to {}: target is not in room '{}'",
                sender.id,
                to,
                room_id
            );
            return Ok(RelayOutcome::Dropped);
        }

        let from_id = sender.id.to_string();
        let event = match payload {
            SignalPayload::Offer(offer) => ServerEvent::Offer(ForwardedOffer {
                from: from_id,
                offer,
                participant: from.into(),
            }),
            SignalPayload::Answer(answer) => ServerEvent::Answer(ForwardedAnswer {
                from: from_id,
                answer,
                participant: from.into(),
            }),
            SignalPayload::IceCandidate(candidate) => {
                ServerEvent::IceCandidate(ForwardedIceCandidate {
                    from: from_id,
                    candidate,
                })
            }
        };

        match push_event(self.message_pusher.as_ref(), &to, &event).await {
            Ok(()) => Ok(RelayOutcome::Delivered),
            Err(e) => {
                tracing::debug!("Dropping signal from {} to {}: {}", sender.id, to, e);
                Ok(RelayOutcome::Dropped)
            }
        }
    }
}
