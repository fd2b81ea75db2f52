use crate::dto::memo_dto::MemoResponse;
use crate::entitys::memo_entity::MemoEntity;
use common::util::date_util::time_to_str;

pub fn to_response(memo: MemoEntity) -> MemoResponse {
    MemoResponse { id: memo.id, user_id: memo.user_id, contents: memo.contents, create_time: time_to_str(memo.create_time) }
}
