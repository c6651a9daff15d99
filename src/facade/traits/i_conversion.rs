use std::path::PathBuf;
use crate::facade::conversion_facade::JobHandle;
use crate::models::error::JobError;
use crate::models::job::ConversionJob;

// Facade 接口，負責在背景執行批次轉換
pub trait ConversionFacadeTrait: Send + Sync {
    /// 將已驗證的任務交給背景執行緒
    /// # 參數
    /// - job: 已通過前置檢查的轉換任務
    /// # 回傳
    /// - 任務控制代碼，可接收事件、取消或等待結束
    fn submit(&self, job: ConversionJob) -> JobHandle;

    /// 驗證輸入後啟動任務；前置條件不符時同步返回錯誤，不會啟動執行緒
    fn start(&self, sources: Vec<PathBuf>, destination: PathBuf) -> Result<JobHandle, JobError> {
        let job = ConversionJob::new(sources, destination)?;
        Ok(self.submit(job))
    }
}
