//! The closed set of meeting types and their static tables.
//!
//! Every [`MeetingType`] owns one [`TypeProfile`] row holding its keyword set
//! (used by [`MeetingClassifier`](crate::meeting::MeetingClassifier)), display
//! label, prompt focus areas (used by
//! [`PromptBuilder`](crate::llm::PromptBuilder)) and the fallback template
//! (topic + default agenda).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MeetingType
// ---------------------------------------------------------------------------

/// One of the ten fixed meeting categories.
///
/// Serialised as its snake_case key (`"team_meeting"`, `"decision_meeting"` …).
/// The declaration order is the canonical enumeration order used for
/// classifier tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    TeamMeeting,
    ProjectMeeting,
    DecisionMeeting,
    TrainingMeeting,
    ClientMeeting,
    BrainstormingMeeting,
    ProgressReportMeeting,
    ProblemSolvingMeeting,
    PlanningMeeting,
    ReviewMeeting,
}

impl Default for MeetingType {
    fn default() -> Self {
        Self::TeamMeeting
    }
}

impl MeetingType {
    /// All variants in canonical order.
    pub const ALL: [MeetingType; 10] = [
        MeetingType::TeamMeeting,
        MeetingType::ProjectMeeting,
        MeetingType::DecisionMeeting,
        MeetingType::TrainingMeeting,
        MeetingType::ClientMeeting,
        MeetingType::BrainstormingMeeting,
        MeetingType::ProgressReportMeeting,
        MeetingType::ProblemSolvingMeeting,
        MeetingType::PlanningMeeting,
        MeetingType::ReviewMeeting,
    ];

    /// Stable snake_case key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        self.profile().key
    }

    /// Human-readable Chinese label (e.g. `"团队例会"`).
    pub fn display_name(self) -> &'static str {
        self.profile().display
    }

    /// Keywords whose presence in a description votes for this type.
    pub fn keywords(self) -> &'static [&'static str] {
        self.profile().keywords
    }

    /// What the language model should pay particular attention to.
    pub fn focus_areas(self) -> &'static [&'static str] {
        self.profile().focus
    }

    /// Fallback topic and default agenda for this type.
    pub fn template(self) -> &'static MeetingTemplate {
        &self.profile().template
    }

    /// Parse a snake_case key, returning `None` for anything unrecognised.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    fn profile(self) -> &'static TypeProfile {
        // PROFILES is declared in the same order as `ALL`.
        &PROFILES[self as usize]
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MeetingType {
    type Err = UnknownMeetingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s.trim()).ok_or_else(|| UnknownMeetingType(s.to_string()))
    }
}

/// Returned by [`MeetingType::from_str`] for an unrecognised key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown meeting type: {0}")]
pub struct UnknownMeetingType(pub String);

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A static agenda entry used by fallback templates.
#[derive(Debug)]
pub struct AgendaTemplate {
    pub title: &'static str,
    pub leader: &'static str,
    pub preparation: &'static str,
    pub participants: &'static str,
}

/// Per-type fallback overlay: replaces the topic and the whole agenda.
#[derive(Debug)]
pub struct MeetingTemplate {
    pub topic: &'static str,
    pub agenda: &'static [AgendaTemplate],
}

struct TypeProfile {
    key: &'static str,
    display: &'static str,
    keywords: &'static [&'static str],
    focus: &'static [&'static str],
    template: MeetingTemplate,
}

const fn item(
    title: &'static str,
    leader: &'static str,
    preparation: &'static str,
    participants: &'static str,
) -> AgendaTemplate {
    AgendaTemplate {
        title,
        leader,
        preparation,
        participants,
    }
}

// ---------------------------------------------------------------------------
// Static profile table
// ---------------------------------------------------------------------------

static PROFILES: [TypeProfile; 10] = [
    TypeProfile {
        key: "team_meeting",
        display: "团队例会",
        keywords: &["周会", "例会", "团队会议", "部门会议", "定期会议", "周例会", "月例会"],
        focus: &["团队目标和工作安排", "成员工作进度和问题", "团队协作和沟通事项"],
        template: MeetingTemplate {
            topic: "团队例会",
            agenda: &[
                item("上周工作总结", "团队成员", "准备工作周报", "全体成员"),
                item("本周工作安排", "项目经理", "准备任务分配表", "全体成员"),
                item("问题讨论", "项目经理", "收集团队反馈", "全体成员"),
            ],
        },
    },
    TypeProfile {
        key: "project_meeting",
        display: "项目讨论会",
        keywords: &["项目", "进度", "开发", "设计", "需求", "技术", "实现", "部署"],
        focus: &[
            "项目目标和里程碑",
            "技术实现方案和难点",
            "资源和时间安排",
            "风险和依赖关系",
        ],
        template: MeetingTemplate {
            topic: "项目进度会议",
            agenda: &[
                item("项目进度汇报", "项目经理", "准备项目进度报告", "项目组全体"),
                item("技术方案讨论", "技术负责人", "准备技术方案文档", "技术团队"),
                item("风险评估", "项目经理", "整理风险清单", "项目组全体"),
            ],
        },
    },
    TypeProfile {
        key: "decision_meeting",
        display: "决策会议",
        keywords: &["决策", "决定", "批准", "审核", "确认", "选择", "方案评估"],
        focus: &[
            "需要决策的具体问题",
            "备选方案对比",
            "决策标准和依据",
            "决策结果和执行计划",
        ],
        template: MeetingTemplate {
            topic: "重要决策会议",
            agenda: &[
                item("方案对比分析", "项目负责人", "准备方案对比文档", "决策委员会"),
                item("决策讨论", "会议主持", "准备决策标准", "决策者"),
                item("执行计划确认", "项目经理", "准备执行方案", "执行团队"),
            ],
        },
    },
    TypeProfile {
        key: "training_meeting",
        display: "培训会议",
        keywords: &["培训", "学习", "分享", "讲座", "培训会", "技能提升", "知识分享"],
        focus: &[
            "培训主题和内容",
            "讲师和学员信息",
            "学习目标和期望成果",
            "培训方式和方法",
        ],
        template: MeetingTemplate {
            topic: "培训会议",
            agenda: &[
                item("培训内容介绍", "培训讲师", "准备培训材料", "培训对象"),
                item("技能演示", "培训讲师", "准备演示环境", "培训对象"),
                item("实践练习", "培训讲师", "准备练习题目", "培训对象"),
            ],
        },
    },
    TypeProfile {
        key: "client_meeting",
        display: "客户会议",
        keywords: &["客户", "客户会议", "商务", "合作", "提案", "展示", "演示"],
        focus: &[
            "客户需求和期望",
            "解决方案和服务内容",
            "商务条件和合作细节",
            "下一步行动计划",
        ],
        template: MeetingTemplate {
            topic: "客户会议",
            agenda: &[
                item("需求确认", "客户代表", "准备需求文档", "客户方"),
                item("方案介绍", "项目经理", "准备解决方案", "双方团队"),
                item("合作确认", "商务负责人", "准备合同草案", "双方决策者"),
            ],
        },
    },
    TypeProfile {
        key: "brainstorming_meeting",
        display: "头脑风暴会议",
        keywords: &["头脑风暴", "创意", "想法", "创新", "点子", "讨论", "建议"],
        focus: &["创意主题和目标", "讨论方向和重点", "创新想法和建议", "可行性分析"],
        template: MeetingTemplate {
            topic: "头脑风暴会议",
            agenda: &[
                item("问题定义", "会议主持", "准备问题背景", "全体成员"),
                item("创意收集", "会议主持", "准备记录工具", "全体成员"),
                item("方案整理", "项目经理", "准备整理框架", "全体成员"),
            ],
        },
    },
    TypeProfile {
        key: "progress_report_meeting",
        display: "汇报会议",
        keywords: &["汇报", "报告", "总结", "进展", "成果", "完成情况"],
        focus: &[
            "已完成的工作和成果",
            "当前进展和状态",
            "遇到的问题和困难",
            "下一步计划和安排",
        ],
        template: MeetingTemplate {
            topic: "进度汇报会议",
            agenda: &[
                item("已完成工作汇报", "各模块负责人", "准备工作成果", "相关团队"),
                item("当前进展说明", "项目经理", "准备进度图表", "管理层"),
                item("下阶段计划", "项目经理", "准备计划文档", "项目组"),
            ],
        },
    },
    TypeProfile {
        key: "problem_solving_meeting",
        display: "问题解决会议",
        keywords: &["问题", "困难", "挑战", "解决", "方案", "改进", "优化"],
        focus: &[
            "具体问题和挑战",
            "问题分析和根本原因",
            "解决方案和行动计划",
            "责任分工和时间安排",
        ],
        template: MeetingTemplate {
            topic: "问题解决会议",
            agenda: &[
                item("问题描述", "问题发现人", "准备问题详情", "相关人员"),
                item("原因分析", "技术专家", "分析问题根因", "技术团队"),
                item("解决方案讨论", "项目经理", "准备解决方案模板", "相关团队"),
            ],
        },
    },
    TypeProfile {
        key: "planning_meeting",
        display: "规划会议",
        keywords: &["计划", "规划", "安排", "策划", "筹备", "准备"],
        focus: &[
            "目标设定和计划内容",
            "时间线和里程碑",
            "资源配置和分工",
            "风险评估和应对措施",
        ],
        template: MeetingTemplate {
            topic: "规划会议",
            agenda: &[
                item("目标设定", "项目负责人", "准备目标框架", "决策层"),
                item("计划制定", "项目经理", "准备计划模板", "执行层"),
                item("资源配置", "资源经理", "准备资源清单", "管理层"),
            ],
        },
    },
    TypeProfile {
        key: "review_meeting",
        display: "复盘会议",
        keywords: &["复盘", "总结", "回顾", "经验", "教训", "反思", "评价"],
        focus: &["回顾期间和范围", "主要成果和经验", "问题和教训总结", "改进措施和建议"],
        template: MeetingTemplate {
            topic: "复盘会议",
            agenda: &[
                item("过程回顾", "项目经理", "准备过程文档", "项目组"),
                item("成果总结", "技术负责人", "准备成果清单", "项目组"),
                item("改进建议", "会议主持", "准备改进框架", "项目组"),
            ],
        },
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
