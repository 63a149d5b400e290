//! Prompt builder for meeting-information extraction.
//!
//! [`PromptBuilder`] produces two strings for the chat call:
//! * the fixed **system instruction** (role + strict output rules), and
//! * the **user prompt** built by [`build_prompt`](PromptBuilder::build_prompt),
//!   which embeds the source text verbatim together with the focus areas of
//!   the detected [`MeetingType`].
//!
//! Both are pure string composition; identical inputs give identical output.

use crate::meeting::MeetingType;

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str = "\
你是一个专业的会议记录助手，擅长从会议描述中准确提取结构化信息。
你的任务是根据用户提供的会议描述，精确提取并返回JSON格式的结构化数据。

重要要求：
1. 仔细分析会议描述中的每一个细节
2. 准确识别人名、地名、时间、主题等信息
3. 确保JSON格式正确，字段完整
4. 时间格式统一为：YYYY年MM月DD日 HH:MM-HH:MM
5. 参会人员用逗号分隔：人员1,人员2,人员3
6. 如果某项信息未明确提供，填写\"待确认\"而非\"无\"

返回格式必须是纯JSON，不包含任何解释或说明文字。";

// ---------------------------------------------------------------------------
// Fixed prompt sections
// ---------------------------------------------------------------------------

const FIELD_LIST: &str = "\
- meeting_topic: 会议主题
- meeting_location: 会议地点
- meeting_time: 会议时间
- participants: 参会人员
- meeting_duration: 会议时长
- agenda: 会议议程（数组格式，每个元素含title、leader、preparation、participants字段）
  - title: 议题标题
  - leader: 负责人
  - preparation: 会前准备
  - participants: 参与人员
- global_preparation: 全局会前准备
";

const EXTRACTION_RULES: &str = "\
【提取规则】
1. 仔细阅读每个词汇，确保不遗漏任何信息
2. 会议主题：提取核心主题，去除冗余词汇
3. 会议地点：具体位置信息，包括\"会议室\"、\"办公室\"等
4. 会议时间：格式为\"YYYY年MM月DD日 HH:MM-HH:MM\"，包含开始和结束时间
5. 参会人员：所有提及的人员姓名，用逗号分隔
6. 会议时长：根据时间差计算或从描述中提取
7. 议程项目：每个项目包含：
   - title: 议题标题（简洁明了）
   - leader: 负责人（可以是具体人名或角色）
   - preparation: 会前准备事项
   - participants: 参与该议题的人员
8. 全局准备：所有参会人员需要共同准备的事项
";

const QUALITY_RULES: &str = "\
【质量控制】
- 如果某个字段信息明确，务必准确填写
- 如果信息模糊但可推断，请根据上下文合理推断
- 只有完全无信息时，才填写\"待确认\"
- 确保所有字段都存在且格式正确
- agenda必须是严格的数组格式
";

const OUTPUT_RULES: &str = "\
【输出要求】
返回标准JSON格式，必须包含所有字段，不包含任何解释文字：";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds type-specific extraction prompts.
///
/// # Example
/// ```rust
/// use meeting_record::llm::PromptBuilder;
/// use meeting_record::meeting::MeetingType;
///
/// let builder = PromptBuilder::new();
/// let prompt = builder.build_prompt(MeetingType::DecisionMeeting, "周五决定采购方案");
/// assert!(prompt.contains("周五决定采购方案"));
/// assert!(prompt.contains("决策会议"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// The system message sent alongside every prompt.
    pub fn system_instruction(&self) -> &'static str {
        SYSTEM_INSTRUCTION
    }

    /// Build the user prompt for `text`, emphasising what matters for
    /// `meeting_type`.
    ///
    /// Structure (in order):
    /// 1. Role preamble naming the meeting type
    /// 2. Task line
    /// 3. Source text, verbatim
    /// 4. Focus areas for the type + canonical field list
    /// 5. Extraction rules, quality rules, output constraint
    pub fn build_prompt(&self, meeting_type: MeetingType, text: &str) -> String {
        let label = meeting_type.display_name();

        let mut prompt = String::with_capacity(2048 + text.len());
        prompt.push_str(&format!(
            "你是一个专业的会议记录专家，擅长从{label}描述中准确提取关键信息。\n\n"
        ));
        prompt.push_str("【任务】仔细分析以下会议描述，提取所有可见的详细信息\n\n");
        prompt.push_str("【会议描述内容】\n");
        prompt.push_str(text);
        prompt.push_str("\n\n【需要提取的结构化字段】\n");
        prompt.push_str(&format!("这是{label}，请重点关注：\n"));
        for focus in meeting_type.focus_areas() {
            prompt.push_str(&format!("- {focus}\n"));
        }
        prompt.push_str(FIELD_LIST);
        prompt.push('\n');
        prompt.push_str(EXTRACTION_RULES);
        prompt.push('\n');
        prompt.push_str(QUALITY_RULES);
        prompt.push('\n');
        prompt.push_str(OUTPUT_RULES);
        prompt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::REQUIRED_FIELDS;

    #[test]
    fn prompt_embeds_source_text_verbatim() {
        let builder = PromptBuilder::new();
        let text = "2025年03月10日 14:00-16:00 在培训室进行新员工培训\n第二行";
        let prompt = builder.build_prompt(MeetingType::TrainingMeeting, text);
        assert!(prompt.contains(text));
    }

    #[test]
    fn prompt_names_type_and_its_focus_areas() {
        let builder = PromptBuilder::new();
        let prompt = builder.build_prompt(MeetingType::ClientMeeting, "与客户沟通");
        assert!(prompt.contains("擅长从客户会议描述中"));
        assert!(prompt.contains("这是客户会议，请重点关注："));
        for focus in MeetingType::ClientMeeting.focus_areas() {
            assert!(prompt.contains(focus), "missing focus area {focus}");
        }
    }

    #[test]
    fn focus_areas_differ_between_types() {
        let builder = PromptBuilder::new();
        let team = builder.build_prompt(MeetingType::TeamMeeting, "x");
        let review = builder.build_prompt(MeetingType::ReviewMeeting, "x");
        assert_ne!(team, review);
        assert!(!team.contains("改进措施和建议"));
        assert!(review.contains("改进措施和建议"));
    }

    #[test]
    fn prompt_lists_every_field_and_rules() {
        let prompt = PromptBuilder::new().build_prompt(MeetingType::PlanningMeeting, "x");
        for field in REQUIRED_FIELDS {
            assert!(prompt.contains(field), "missing field {field}");
        }
        assert!(prompt.contains("YYYY年MM月DD日 HH:MM-HH:MM"));
        assert!(prompt.contains("用逗号分隔"));
        assert!(prompt.contains("待确认"));
        assert!(prompt.ends_with("不包含任何解释文字："));
    }

    #[test]
    fn prompt_is_deterministic() {
        let builder = PromptBuilder::new();
        for t in MeetingType::ALL {
            assert_eq!(builder.build_prompt(t, "周会"), builder.build_prompt(t, "周会"));
        }
    }

    #[test]
    fn system_instruction_demands_pure_json() {
        let system = PromptBuilder::new().system_instruction();
        assert!(system.contains("会议记录助手"));
        assert!(system.contains("纯JSON"));
    }
}
